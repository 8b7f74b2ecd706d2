//! Observable state of a fetch attempt.

/// State of the newest fetch attempt owned by a view.
///
/// A fresh controller starts in `Loading`, and every new attempt resets to
/// `Loading` before settling into one of the terminal states. Superseded
/// attempts never write here, so a terminal payload always belongs to the
/// newest request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T, E> {
    /// A request is in flight, or its result is being held back so the
    /// loading indicator stays visible long enough to read.
    Loading,

    /// The newest request produced a value.
    Success(T),

    /// The newest request failed.
    Error(E),
}

impl<T, E> Default for FetchState<T, E> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T, E> FetchState<T, E> {
    /// Check if a loading indicator should be shown.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if the attempt settled successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if the attempt settled with an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Get the fetched value, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Get the settled error, if any.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_is_default() {
        assert_eq!(
            FetchState::<String, String>::default(),
            FetchState::Loading
        );
    }

    #[test]
    fn predicates_match_variants() {
        let loading = FetchState::<&str, &str>::Loading;
        assert!(loading.is_loading());
        assert!(!loading.is_success());
        assert!(!loading.is_error());

        let success = FetchState::<&str, &str>::Success("data");
        assert!(!success.is_loading());
        assert!(success.is_success());

        let error = FetchState::<&str, &str>::Error("boom");
        assert!(!error.is_loading());
        assert!(error.is_error());
    }

    #[test]
    fn data_returns_success_payload_only() {
        assert_eq!(FetchState::<&str, &str>::Loading.data(), None);
        assert_eq!(FetchState::<&str, &str>::Success("data").data(), Some(&"data"));
        assert_eq!(FetchState::<&str, &str>::Error("boom").data(), None);
    }

    #[test]
    fn error_returns_failure_payload_only() {
        assert_eq!(FetchState::<&str, &str>::Loading.error(), None);
        assert_eq!(FetchState::<&str, &str>::Success("data").error(), None);
        assert_eq!(FetchState::<&str, &str>::Error("boom").error(), Some(&"boom"));
    }
}
