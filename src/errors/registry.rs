#[derive(thiserror::Error, Debug)]
pub enum RegistryErrorKind {
    #[error("Identifier '{id}' not found in registry")]
    NotFound { id: Box<str> },
}
