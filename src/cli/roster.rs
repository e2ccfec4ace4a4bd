//! Roster CLI commands

use crate::config::Settings;
use crate::display::format_roster;
use crate::error::StaffingResult;
use crate::storage::Storage;

/// Print the cached roster
pub fn handle_roster_command(storage: &Storage, settings: &Settings) -> StaffingResult<()> {
    let records = storage.roster.get_all()?;
    print!("{}", format_roster(&records, settings));

    let incomplete = records.iter().filter(|r| r.is_incomplete()).count();
    if incomplete > 0 {
        println!();
        println!(
            "{} collaborator(s) have no profile or assignment yet. Edit them in 'staffing tui'.",
            incomplete
        );
    }
    Ok(())
}
