/// Address-bar keyword handling: build go URLs and navigate tabs
use log::info;
use serde::{Deserialize, Serialize};

/// Key shown in the suggestion while nothing has been typed yet
pub const PLACEHOLDER_KEY: &str = "your-key";

/// How the browser asked for a committed omnibox entry to be opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    CurrentTab,
    NewForegroundTab,
    NewBackgroundTab,
    Other(String),
}

impl Disposition {
    pub fn parse(raw: &str) -> Disposition {
        match raw {
            "currentTab" => Disposition::CurrentTab,
            "newForegroundTab" => Disposition::NewForegroundTab,
            "newBackgroundTab" => Disposition::NewBackgroundTab,
            other => Disposition::Other(other.to_string()),
        }
    }
}

/// One navigation primitive of the host browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    UpdateCurrentTab { url: String },
    CreateTab { url: String, active: bool },
}

/// Host tab primitives; calls are fire-and-forget
pub trait TabNavigator {
    fn update_current_tab(&self, url: &str);
    fn create_tab(&self, url: &str, active: bool);

    fn navigate(&self, navigation: &Navigation) {
        match navigation {
            Navigation::UpdateCurrentTab { url } => self.update_current_tab(url),
            Navigation::CreateTab { url, active } => self.create_tab(url, *active),
        }
    }
}

/// Entry offered to the omnibox while the user types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub content: String,
    pub description: String,
}

/// Redirect URL for a key, or `None` when the trimmed key is empty
pub fn go_url(redirect_base: &str, raw: &str) -> Option<String> {
    let key = raw.trim();
    if key.is_empty() {
        None
    } else {
        Some(format!("{}{}", redirect_base, urlencoding::encode(key)))
    }
}

pub fn suggestion(redirect_base: &str, raw: &str) -> Suggestion {
    let target = go_url(redirect_base, raw)
        .unwrap_or_else(|| format!("{}{}", redirect_base, PLACEHOLDER_KEY));

    Suggestion {
        content: raw.to_string(),
        description: format!(
            "Open go/<match> at app.tawhid.in — <url>{}</url>",
            escape_xml(&target)
        ),
    }
}

/// The navigation a committed entry maps to, if any
pub fn navigation_for(redirect_base: &str, raw: &str, disposition: &Disposition) -> Option<Navigation> {
    let url = go_url(redirect_base, raw)?;

    Some(match disposition {
        Disposition::CurrentTab => Navigation::UpdateCurrentTab { url },
        Disposition::NewBackgroundTab => Navigation::CreateTab { url, active: false },
        Disposition::NewForegroundTab | Disposition::Other(_) => {
            Navigation::CreateTab { url, active: true }
        }
    })
}

/// Handle a committed omnibox entry: at most one navigation, no retries
pub fn handle_input_entered<N: TabNavigator>(
    navigator: &N,
    redirect_base: &str,
    raw: &str,
    disposition: &Disposition,
) -> Option<Navigation> {
    let navigation = navigation_for(redirect_base, raw, disposition)?;
    info!("omnibox navigation {:?}", navigation);
    navigator.navigate(&navigation);
    Some(navigation)
}

// Omnibox descriptions are XML; only the url body needs escaping
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{Navigation, TabNavigator};
    use std::cell::RefCell;

    /// Records navigations instead of touching tabs
    #[derive(Default)]
    pub struct RecordingNavigator {
        pub calls: RefCell<Vec<Navigation>>,
    }

    impl TabNavigator for RecordingNavigator {
        fn update_current_tab(&self, url: &str) {
            self.calls.borrow_mut().push(Navigation::UpdateCurrentTab {
                url: url.to_string(),
            });
        }

        fn create_tab(&self, url: &str, active: bool) {
            self.calls.borrow_mut().push(Navigation::CreateTab {
                url: url.to_string(),
                active,
            });
        }
    }
}
