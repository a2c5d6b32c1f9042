/// The verified claims of a session cookie.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    /// The uid the session belongs to.
    pub uid: String,
    /// The email address carried in the claims.
    pub email: String,
    /// When the cookie was issued, unix seconds.
    pub issued_at: i64,
    /// When the cookie expires, unix seconds.
    pub expires_at: i64,
}
