pub mod change;
pub mod error;
pub mod ids;
pub mod view;

pub use change::{CellEdit, ChangeSet, RowDraft};
pub use error::{ModelError, Result};
pub use ids::{FieldName, RowId};
pub use view::{DatasetSnapshot, PageView, RowView};
