/// Protocol misuse reported by a [`Page`](crate::Page).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
	/// The registry was already created; the page has exactly one.
	#[error("registry already created for this page")]
	RegistryAlreadyCreated,
}
