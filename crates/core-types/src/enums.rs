
/// How a single optional form field arrived in an update request.
///
/// Zero-valued business data is legitimate, so "not sent" and "sent but
/// empty or zero" are kept apart instead of being folded into one
/// truthiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence<T> {
    /// The field was not part of the submission.
    Absent,
    /// The field was sent but holds an empty string or a zero.
    Falsy,
    /// The field was sent with a usable value.
    Present(T),
}

impl<T> Presence<T> {
    /// Classifies an already-coerced value, using `is_falsy` to decide
    /// whether it counts as empty.
    pub fn classify(value: Option<T>, is_falsy: impl FnOnce(&T) -> bool) -> Self {
        match value {
            None => Presence::Absent,
            Some(v) if is_falsy(&v) => Presence::Falsy,
            Some(v) => Presence::Present(v),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present(_))
    }

    pub fn as_ref(&self) -> Presence<&T> {
        match self {
            Presence::Absent => Presence::Absent,
            Presence::Falsy => Presence::Falsy,
            Presence::Present(v) => Presence::Present(v),
        }
    }

    /// Returns the value only when it is `Present`.
    pub fn value(self) -> Option<T> {
        match self {
            Presence::Present(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_keeps_absent_and_falsy_apart() {
        assert_eq!(Presence::classify(None::<i32>, |q| *q == 0), Presence::Absent);
        assert_eq!(Presence::classify(Some(0), |q| *q == 0), Presence::Falsy);
        assert_eq!(Presence::classify(Some(7), |q| *q == 0), Presence::Present(7));
    }

    #[test]
    fn value_is_only_returned_when_present() {
        assert_eq!(Presence::Present("x").value(), Some("x"));
        assert_eq!(Presence::<&str>::Falsy.value(), None);
        assert!(!Presence::<&str>::Absent.is_present());
    }
}
