mod record;
mod registry;

pub use record::TemplateRecord;
pub use registry::{TemplateMatch, TemplateRegistry, TemplateRegistryError};
