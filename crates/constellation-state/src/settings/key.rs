use std::marker::PhantomData;

/// Declare a [Key] constant.
///
/// ```rust
/// use constellation_state::register_setting_key;
///
/// register_setting_key!(pub const ORDER: Vec<String> = "sortableList");
/// assert_eq!(ORDER.name(), "sortableList");
/// ```
#[macro_export]
macro_rules! register_setting_key {
    ($vis:vis const $name:ident: $ty:ty = $key:literal) => {
        $vis const $name: $crate::settings::Key<$ty> = $crate::settings::Key::new($key);
    };
}

/// Name of a setting, tagged with the type stored under it.
#[derive(Debug)]
pub struct Key<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

// Derives would require `T: Copy`.
impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> Key<T> {
    #[doc(hidden)]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    #[allow(missing_docs)]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}
