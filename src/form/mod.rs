//! Form interaction controller
//!
//! The pure part of the allocation forms: modal lifecycle, the secondary
//! allocation row editor, the collaborator view-model and the pre-submit
//! budget check. Nothing here touches the terminal or the network.

pub mod collaborator;
pub mod modal;
pub mod rows;
pub mod validation;

pub use collaborator::{CollaboratorForm, FormKind, FormSubmission, SubmitTarget};
pub use modal::{Modal, ModalPhase};
pub use rows::{RowEditor, RowEntry, RowTable, RowView, StagedRow, PLACEHOLDER_TEXT};
pub use validation::{
    available_budget, check_budget, AxisBudget, BudgetCheck, Field, FieldError, SubmitBlock,
};
