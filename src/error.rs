pub type GlowgridResult<T> = Result<T, GlowgridError>;

#[derive(thiserror::Error, Debug)]
pub enum GlowgridError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("color error: {0}")]
    Color(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlowgridError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            GlowgridError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(GlowgridError::color("x").to_string().contains("color error:"));
        assert!(
            GlowgridError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = GlowgridError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
