//! Call-site metadata attached to every log call

use std::panic::Location;

/// Where a log call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CallSite<'a> {
    pub file: &'a str,
    pub line: u32,
    pub column: u32,
    pub function: &'a str,
}

impl<'a> CallSite<'a> {
    pub const fn new(file: &'a str, line: u32, column: u32, function: &'a str) -> Self {
        Self {
            file,
            line,
            column,
            function,
        }
    }

    /// Call site of the nearest caller not marked `#[track_caller]`.
    ///
    /// The function name is not available this way and is left empty; the
    /// logging macros fill it in.
    #[track_caller]
    pub fn caller() -> CallSite<'static> {
        let location = Location::caller();
        CallSite {
            file: location.file(),
            line: location.line(),
            column: location.column(),
            function: "",
        }
    }

    #[must_use]
    pub fn with_function(mut self, function: &'a str) -> Self {
        self.function = function;
        self
    }
}

/// Reduce the type name of a marker fn nested in some function to that
/// function's bare name.
///
/// `my_crate::server::Handler::run::{{closure}}::__here` becomes `run`.
#[doc(hidden)]
pub fn short_function_name(type_name: &'static str) -> &'static str {
    let mut name = type_name.strip_suffix("::__here").unwrap_or(type_name);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    match name.rfind("::") {
        Some(pos) => &name[pos + 2..],
        None => name,
    }
}

/// Expands to the name of the enclosing function as a `&'static str`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::core::call_site::short_function_name(__type_name_of(__here))
    }};
}

/// Expands to the [`CallSite`] of the macro invocation.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(file!(), line!(), column!(), $crate::function_name!())
    };
}
