/// Browser wall clock in milliseconds, for recency stamps on records.
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}
