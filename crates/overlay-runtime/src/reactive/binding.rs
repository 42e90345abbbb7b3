#![forbid(unsafe_code)]

//! Read bindings over observable state.
//!
//! A [`Binding<T>`] is a getter: it evaluates lazily on every `get()` and
//! never caches. Controllers in controlled mode hold a `Binding<bool>` so
//! the owner stays the single source of truth for `open`.
//!
//! ```ignore
//! let open = Observable::new(false);
//! let b = bind_observable(&open);
//! open.set(true);
//! assert!(b.get());
//! ```

use std::rc::Rc;

use super::observable::Observable;

/// A read-only view over some external value.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: std::fmt::Debug + 'static> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .finish()
    }
}

impl<T: 'static> Binding<T> {
    /// Create a binding that evaluates `f` on each `get()` call.
    pub fn new(f: impl Fn() -> T + 'static) -> Self {
        Self { eval: Rc::new(f) }
    }

    /// Get the current bound value.
    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }
}

/// Create a direct binding to an observable.
pub fn bind_observable<T: Clone + PartialEq + 'static>(source: &Observable<T>) -> Binding<T> {
    let src = source.clone();
    Binding::new(move || src.get())
}

/// Create a mapped binding: `source` value transformed by `map`.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &Observable<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let src = source.clone();
    Binding::new(move || src.with(|v| map(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_tracks_source() {
        let source = Observable::new(false);
        let b = bind_observable(&source);
        assert!(!b.get());
        source.set(true);
        assert!(b.get());
    }

    #[test]
    fn mapped_binding() {
        let source = Observable::new(3);
        let b = bind_mapped(&source, |v| v * 10);
        assert_eq!(b.get(), 30);
        source.set(4);
        assert_eq!(b.get(), 40);
    }

    #[test]
    fn debug_shows_current_value() {
        let b = Binding::new(|| true);
        assert!(format!("{b:?}").contains("true"));
    }
}
