#[macro_export]
macro_rules! client {
    () => {{
        $crate::reqwest::Client::builder()
            .user_agent($crate::user_agent())
            .build()
    }};
}

/// Returns the last path segment of an URL, ignoring any query string.
#[macro_export]
macro_rules! extract_file_name_from_url {
    ($x:expr) => {{
        let path = $x.split(['?', '#']).next().unwrap_or_default();
        path.rsplit('/').next().unwrap_or_default().to_string()
    }};
}
