#[macro_export]
macro_rules! impl_default_for {
    ($name:ident) => {
        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// Lifecycle accessors for a reader holding its session in a `session` field
#[macro_export]
macro_rules! impl_reader_lifecycle {
    ($reader:ident, $technology:ident) => {
        impl $reader {
            pub fn tag(&self) -> Option<&$crate::tag::Tag> {
                self.session.tag()
            }

            pub fn technology(
                &self,
            ) -> Result<&(dyn $technology + 'static), $crate::error::TagError> {
                self.session.technology()
            }

            pub fn state(&self) -> $crate::session::SessionState {
                self.session.state()
            }

            pub async fn close(&mut self) -> Result<(), $crate::error::TagError> {
                self.session.close().await
            }

            pub async fn dispose(&mut self) {
                self.session.dispose().await
            }
        }
    };
}
