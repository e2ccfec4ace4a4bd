//! Allocation server backend
//!
//! `AllocationBackend` is the seam between the controller and the server.
//! `HttpBackend` talks to the real endpoints with a blocking reqwest client;
//! tests substitute their own implementation.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::Url;
use tracing::{debug, info};

use crate::config::ServerSettings;
use crate::error::{StaffingError, StaffingResult};
use crate::form::{FormSubmission, SubmitTarget};
use crate::models::{AllocationRow, Matricule};

use super::schema::parse_repartitions;

/// What the server did with a posted form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub status: u16,
    /// Where the server redirected to, if it did
    pub location: Option<String>,
}

/// Operations the form controller needs from the server
pub trait AllocationBackend: Send + Sync {
    /// Fetch the secondary allocations of a collaborator
    fn fetch_repartitions(&self, matricule: &Matricule) -> StaffingResult<Vec<AllocationRow>>;

    /// Post a validated form
    fn submit(&self, submission: &FormSubmission) -> StaffingResult<SubmitReceipt>;
}

/// Backend over HTTP
pub struct HttpBackend {
    base_url: Url,
    client: Client,
}

impl HttpBackend {
    pub fn new(settings: &ServerSettings) -> StaffingResult<Self> {
        let base_url = Url::parse(settings.base_url.trim_end_matches('/')).map_err(|e| {
            StaffingError::Config(format!("Invalid server URL '{}': {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StaffingError::Config(format!(
                "Server URL '{}' cannot be used as a base",
                settings.base_url
            )));
        }

        // A form post answers with a redirect to the list page; that redirect
        // is the result, so it is not followed.
        let mut builder = Client::builder().redirect(Policy::none());
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { base_url, client })
    }

    /// Build an absolute URL from path segments, percent-encoding each one
    pub fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> StaffingResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StaffingError::Config("Server URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments.iter().map(|s| s.as_ref()));
        Ok(url)
    }

    pub fn repartitions_url(&self, matricule: &Matricule) -> StaffingResult<Url> {
        self.endpoint(&["collaborateurs", "repartition", "get", matricule.as_str()])
    }

    pub fn submit_url(&self, target: &SubmitTarget) -> StaffingResult<Url> {
        self.endpoint(&target.segments())
    }
}

impl AllocationBackend for HttpBackend {
    fn fetch_repartitions(&self, matricule: &Matricule) -> StaffingResult<Vec<AllocationRow>> {
        let url = self.repartitions_url(matricule)?;
        debug!(%url, "fetching secondary allocations");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StaffingError::Http(format!(
                "GET repartitions for {} returned {}",
                matricule, status
            )));
        }

        let body = response.text()?;
        let rows = parse_repartitions(&body)?;
        debug!(%matricule, count = rows.len(), "secondary allocations fetched");
        Ok(rows)
    }

    fn submit(&self, submission: &FormSubmission) -> StaffingResult<SubmitReceipt> {
        let url = self.submit_url(&submission.target)?;
        info!(%url, fields = submission.fields.len(), "posting collaborator form");

        let response = self.client.post(url).form(&submission.fields).send()?;
        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(StaffingError::Http(format!(
                "POST {} returned {}",
                submission.target.path(),
                status
            )));
        }

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(SubmitReceipt {
            status: status.as_u16(),
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(&ServerSettings {
            base_url: base.into(),
            request_timeout_secs: None,
        })
        .unwrap()
    }

    #[test]
    fn test_repartitions_url() {
        let b = backend("http://hr.local:5000/");
        let url = b.repartitions_url(&Matricule::new("M001")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://hr.local:5000/collaborateurs/repartition/get/M001"
        );
    }

    #[test]
    fn test_urls_under_prefix_and_encoded() {
        let b = backend("http://hr.local/app");
        let url = b.repartitions_url(&Matricule::new("A B/1")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://hr.local/app/collaborateurs/repartition/get/A%20B%2F1"
        );

        let url = b
            .submit_url(&SubmitTarget::Edit(Matricule::new("M7")))
            .unwrap();
        assert_eq!(url.as_str(), "http://hr.local/app/collaborateurs/modifier/M7");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpBackend::new(&ServerSettings {
            base_url: "not a url".into(),
            request_timeout_secs: Some(5),
        });
        assert!(matches!(result, Err(StaffingError::Config(_))));
    }
}
