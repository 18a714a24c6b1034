use lazy_static::lazy_static;

lazy_static! {
    pub static ref BLESS: bool = std::env::var("BLESS") == Ok("1".into());
    pub static ref FAIL_TODO: bool = std::env::var("FAIL_TODO") == Ok("1".into());
}

macro_rules! prefix_severity {
    (Suggestion, $content:expr) => {
        format!("Hint: {}", $content)
    };

    ($other:ident, $content:expr) => {
        $content
    };
}

/// Builds a failed test outcome from lines of a failure report.
macro_rules! print_fail {
    ($($severity:ident: $($content:expr),*;)*) => {{
        let mut report = String::new();
        printer! { report
            $($severity: $($content),*;)*
        };
        fail!(report)
    }};
}

/// Appends lines to a failure report.
macro_rules! printer {
    ($report:ident $($severity:ident: $($content:expr),*;)*) => {$(
        $report.push_str(&prefix_severity!($severity, format!($($content),*)));
        $report.push('\n');
    )*};
}

macro_rules! fail {
    ($report:expr) => {
        libtest_mimic::Outcome::Failed {
            msg: Some($report),
        }
    };
}

macro_rules! real_path {
    ($path:expr) => {
        format!("srs/{}", $path)
    };
}
