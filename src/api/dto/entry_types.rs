//! DTOs for the registered entry kinds.

use serde::Serialize;

use crate::domain::forms::AdminForm;

/// An entry kind and the admin form used to edit entries of that kind.
#[derive(Debug, Serialize)]
pub struct EntryTypeItem {
    pub name: String,
    pub form: AdminForm,
}

/// Response containing every registered entry kind.
#[derive(Debug, Serialize)]
pub struct EntryTypeListResponse {
    pub items: Vec<EntryTypeItem>,
}
