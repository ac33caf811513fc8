/// Caller-supplied score computation.
///
/// Must be deterministic and side-effect free. The engine calls it exactly
/// once per insert or mutate and never caches the result.
pub trait ScoreFn<T: ?Sized> {
    fn score(&self, payload: &T) -> i64;
}

impl<T: ?Sized, F> ScoreFn<T> for F
where
    F: Fn(&T) -> i64,
{
    fn score(&self, payload: &T) -> i64 {
        self(payload)
    }
}

/// Score supplied up front rather than computed from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixed(pub i64);

impl<T: ?Sized> ScoreFn<T> for Fixed {
    fn score(&self, _payload: &T) -> i64 {
        self.0
    }
}
