pub const HEALTH_CHECK_BODY: &str = "HEALTH CHECK: OK";

pub async fn health_check() -> &'static str {
    HEALTH_CHECK_BODY
}
