//! Caller location for error-level records.
//!
//! `Location::caller()` gives file and line of the frame that called a
//! `#[track_caller]` function, but not the enclosing function's name. The
//! [`caller_info!`](crate::caller_info) macro fills that in when used at the
//! call site. Either way the result is a diagnostic, not something to branch on.

use std::panic::Location;

use crate::fields::{Fields, Value, FILE_KEY, FUNC_KEY, LINE_KEY};

/// Rendered in the `Func` field when the function name is not known.
pub const UNKNOWN_FUNC: &str = "unknown";

/// Source location of a logging call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerInfo {
    pub file: &'static str,
    pub line: u32,
    pub func: Option<&'static str>,
}

impl CallerInfo {
    pub const fn new(file: &'static str, line: u32, func: Option<&'static str>) -> Self {
        Self { file, line, func }
    }

    /// Location of whoever called into the current `#[track_caller]` chain.
    #[track_caller]
    pub fn capture() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
            func: None,
        }
    }

    /// Adds `File`, `Line` and `Func` to `fields`.
    pub fn apply(&self, fields: &mut Fields) {
        fields.insert(FILE_KEY.to_string(), Value::from(self.file));
        fields.insert(LINE_KEY.to_string(), Value::from(self.line));
        fields.insert(
            FUNC_KEY.to_string(),
            Value::from(self.func.unwrap_or(UNKNOWN_FUNC)),
        );
    }
}

/// Strips the helper suffix off a type name produced by [`caller_info!`].
#[doc(hidden)]
pub fn enclosing_fn_name(helper_type_name: &'static str) -> &'static str {
    let name = helper_type_name
        .strip_suffix("::__caller_marker")
        .unwrap_or(helper_type_name);
    // Closures show up as `{{closure}}` segments.
    let mut name = name;
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

/// [`CallerInfo`] for the current source location, including the
/// enclosing function's path.
#[macro_export]
macro_rules! caller_info {
    () => {{
        fn __caller_marker() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::caller::CallerInfo::new(
            file!(),
            line!(),
            Some($crate::caller::enclosing_fn_name(__type_name_of(
                __caller_marker,
            ))),
        )
    }};
}
