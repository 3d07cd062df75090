use strum_macros::Display;

/// Where the value of an [`Advisory`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Origin {
    /// The completion service answered with non-empty text.
    Service,
    /// The service was unreachable or answered without a completion, so a
    /// fixed default was substituted.
    Fallback,
}

/// Result of an advisory call. `origin` tells a service answer apart from a
/// substituted default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Advisory<T> {
    pub fn service(value: T) -> Self {
        Self { value, origin: Origin::Service }
    }

    pub fn fallback(value: T) -> Self {
        Self { value, origin: Origin::Fallback }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Fallback
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Advisory<U> {
        Advisory { value: f(self.value), origin: self.origin }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_map_keeps_origin() {
        let fixture = Advisory::fallback("No plan generated.");

        let actual = fixture.map(str::len);

        let expected = Advisory { value: 18, origin: Origin::Fallback };
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::Service.to_string(), "service");
        assert_eq!(Origin::Fallback.to_string(), "fallback");
    }
}
