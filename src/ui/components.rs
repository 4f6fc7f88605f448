mod confirm_dialog;
mod table;
mod text_input;
mod text_viewer;

pub use confirm_dialog::{ConfirmDialog, ConfirmEvent};
pub use table::{ColumnDef, Table, TableEvent, TableRow};
pub use text_input::{TextInput, TextInputEvent};
pub use text_viewer::{TextViewer, TextViewerEvent};
