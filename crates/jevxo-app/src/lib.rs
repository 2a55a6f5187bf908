// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dialog;
pub mod drafts;
pub mod forms;
pub mod ids;
pub mod model;
pub mod payroll;
pub mod record;
pub mod schema;
pub mod state;
pub mod summary;
pub mod table;
pub mod validation;

pub use dialog::*;
pub use drafts::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use payroll::*;
pub use record::*;
pub use state::*;
pub use summary::*;
pub use table::*;
