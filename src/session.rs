//! Interactive state behind the converter UI: input text, latest location
//! and the rendered markdown.

use anyhow::Result;
use tokio::sync::watch;

use crate::formatter::format_markdown;
use crate::location::LocationResult;
use crate::platform::Clipboard;
use crate::provider::LocationProvider;

pub struct Session {
    provider: LocationProvider,
    location: watch::Receiver<LocationResult>,
    raw_text: String,
    markdown: String,
}

impl Session {
    pub fn new(provider: LocationProvider) -> Self {
        let location = provider.subscribe();
        Self {
            provider,
            location,
            raw_text: String::new(),
            markdown: String::new(),
        }
    }

    /// Replace the pasted input. The markdown is only refreshed by [`Session::format`].
    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn location(&self) -> LocationResult {
        self.location.borrow().clone()
    }

    /// Start a location request cycle
    pub fn request_location(&self) {
        self.provider.request_permission_and_start();
    }

    /// Re-render the markdown from the current input and location
    pub fn format(&mut self) -> &str {
        let location = self.location.borrow_and_update().clone();
        self.markdown = format_markdown(&self.raw_text, &location);
        &self.markdown
    }

    /// Wait for the next published location, then re-render.
    ///
    /// Returns `false` once the provider is gone and no more updates can arrive.
    pub async fn location_changed(&mut self) -> bool {
        if self.location.changed().await.is_err() {
            return false;
        }
        self.format();
        true
    }

    /// Put the rendered markdown on the clipboard
    pub async fn copy_to(&self, clipboard: &dyn Clipboard) -> Result<()> {
        clipboard.set_text(&self.markdown).await?;
        tracing::info!(bytes = self.markdown.len(), "Copied markdown to clipboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use futures::FutureExt;
    use futures::future::BoxFuture;

    use crate::location::{Coordinate, PostalAddress};
    use crate::platform::{Authorization, Geocoder, LocationSource};
    use crate::sources::{DisabledLocationSource, FixedLocationSource};

    struct CityGeocoder;

    impl Geocoder for CityGeocoder {
        fn reverse_geocode(&self, _: Coordinate) -> BoxFuture<'_, Result<PostalAddress>> {
            futures::future::ready(Ok(PostalAddress {
                locality: Some("Oslo".to_string()),
                country: Some("Norway".to_string()),
                ..Default::default()
            }))
            .boxed()
        }
    }

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Mutex<Option<String>>,
    }

    impl Clipboard for MemoryClipboard {
        fn set_text<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<()>> {
            *self.contents.lock().unwrap() = Some(text.to_string());
            futures::future::ready(Ok(())).boxed()
        }
    }

    fn session_with(source: Arc<dyn LocationSource>) -> Session {
        Session::new(LocationProvider::new(source, Arc::new(CityGeocoder)))
    }

    #[tokio::test]
    async fn test_format_without_location() {
        let mut session = session_with(Arc::new(DisabledLocationSource));
        session.set_raw_text("ll_switch_black Switch\nPort\t12");
        assert_eq!(session.markdown(), "");
        assert_eq!(session.format(), "## Switch\n- **Port**: 12");
    }

    #[tokio::test]
    async fn test_reformats_when_location_arrives() {
        let mut session =
            session_with(Arc::new(FixedLocationSource::new(Coordinate::new(59.9, 10.75))));
        session.set_raw_text("ll_dns_black DNS\nResolved\tyes");
        session.format();

        session.request_location();
        while !session.location().is_terminal() {
            assert!(session.location_changed().await);
        }

        assert_eq!(
            session.markdown(),
            "## DNS\n- **Resolved**: yes\n\n## Location\nLatitude: 59.9\nLongitude: 10.75\nAddress: Oslo, Norway"
        );
    }

    #[tokio::test]
    async fn test_disabled_location_leaves_output_plain() {
        let mut session = session_with(Arc::new(DisabledLocationSource));
        session.set_raw_text("ll_www_green TCP");
        session.request_location();
        assert_eq!(
            session.location(),
            LocationResult::Unavailable("Location services are not enabled.".to_string())
        );
        assert_eq!(session.format(), "## TCP");
    }

    #[tokio::test]
    async fn test_copy_to_clipboard() {
        let mut session = session_with(Arc::new(DisabledLocationSource));
        session.set_raw_text("flash_on_green PoE\nWatts\t15.4");
        session.format();

        let clipboard = MemoryClipboard::default();
        session.copy_to(&clipboard).await.unwrap();
        assert_eq!(
            clipboard.contents.lock().unwrap().as_deref(),
            Some("## PoE\n- **Watts**: 15.4")
        );
    }

    #[tokio::test]
    async fn test_denied_source_stays_unavailable() {
        struct DeniedSource;
        impl LocationSource for DeniedSource {
            fn services_enabled(&self) -> bool {
                true
            }
            fn request_authorization(&self) -> BoxFuture<'_, Authorization> {
                futures::future::ready(Authorization::Denied).boxed()
            }
            fn start_single_location_update(&self) -> BoxFuture<'_, Result<Coordinate>> {
                futures::future::pending().boxed()
            }
        }

        let mut session = session_with(Arc::new(DeniedSource));
        session.set_raw_text("ethernet_green Test");
        session.request_location();
        while !session.location().is_terminal() {
            assert!(session.location_changed().await);
        }
        assert_eq!(session.markdown(), "# Ethernet Test");
    }
}
