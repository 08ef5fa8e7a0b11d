/// Liveness probe. Answers as soon as the router is up, regardless of
/// which model artifacts loaded.
pub async fn home() -> &'static str {
    "Solar & Electricity ML API Running!"
}
