/// Environment-backed service configuration.
///
/// Field names map to upper-cased variables (`database_url` ← `DATABASE_URL`).
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn try_from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// # Panics
    ///
    /// Panics naming the offending variable when it is missing or malformed.
    fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(e) => panic!("invalid service configuration: {e}"),
        }
    }
}
