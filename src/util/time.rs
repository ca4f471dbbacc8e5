/// Seconds since the UNIX epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn current_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Seconds since the UNIX epoch.
#[cfg(target_arch = "wasm32")]
pub fn current_time_secs() -> f64 {
    js_sys::Date::now() / 1000.0
}

/// Whole seconds since the UNIX epoch, as stored in `savedAt`.
pub fn timestamp_secs() -> u64 {
    current_time_secs() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_after_2020() {
        assert!(timestamp_secs() > 1_577_836_800);
    }
}
