// src/display/strings.rs
//! Localized user interface text (English and Portuguese)

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Portuguese,
}

impl Language {
    /// Language of a POSIX or Windows style locale name, e.g. `pt_BR.UTF-8` or `pt-PT`
    pub fn from_locale(locale: &str) -> Self {
        let code = locale
            .split(&['_', '-', '.'][..])
            .next()
            .unwrap_or_default();

        if code.eq_ignore_ascii_case("pt") {
            Language::Portuguese
        } else {
            Language::English
        }
    }

    /// Language of the current user.
    ///
    /// The display language set in Windows wins; the usual locale variables
    /// are the fallback (and the only source on other platforms).
    pub fn detect() -> Self {
        Self::detect_with(user_ui_language(), |var| std::env::var(var).ok())
    }

    fn detect_with(ui_language: Option<String>, env: impl Fn(&str) -> Option<String>) -> Self {
        ui_language
            .into_iter()
            .chain(
                ["LC_ALL", "LC_MESSAGES", "LANG"]
                    .iter()
                    .filter_map(|var| env(var)),
            )
            .find(|value| !value.is_empty())
            .map(|locale| Self::from_locale(&locale))
            .unwrap_or(Language::English)
    }

    pub fn strings(self) -> &'static UiStrings {
        match self {
            Language::English => &ENGLISH,
            Language::Portuguese => &PORTUGUESE,
        }
    }
}

/// First entry of the user's preferred display languages, e.g. `pt-BR`
#[cfg(windows)]
fn user_ui_language() -> Option<String> {
    use windows::System::UserProfile::GlobalizationPreferences;

    let languages = GlobalizationPreferences::Languages().ok()?;
    let first = languages.GetAt(0).ok()?;
    Some(first.to_string())
}

#[cfg(not(windows))]
fn user_ui_language() -> Option<String> {
    None
}

#[derive(Debug)]
pub struct UiStrings {
    pub window_title: &'static str,
    pub latitude_label: &'static str,
    pub longitude_label: &'static str,
    pub load_button: &'static str,
    pub save_button: &'static str,
    pub location_set: &'static str,
    pub load_error: &'static str,
    pub save_error: &'static str,
    pub set_heading: &'static str,
    pub read_heading: &'static str,
    pub query_heading: &'static str,
}

pub static ENGLISH: UiStrings = UiStrings {
    window_title: "FakeGPS - Location",
    latitude_label: "Latitude:",
    longitude_label: "Longitude:",
    load_button: "Load Location",
    save_button: "Set Location",
    location_set: "The location has been set!",
    load_error: "Error reading current location",
    save_error: "Error setting location",
    set_heading: "The following location has been set in the driver's registry settings:",
    read_heading: "The following location is set in the driver's registry settings:",
    query_heading: "The following location has been returned from the Windows location API:",
};

pub static PORTUGUESE: UiStrings = UiStrings {
    window_title: "FakeGPS - Localização",
    latitude_label: "Latitude:",
    longitude_label: "Longitude:",
    load_button: "Carregar Localização",
    save_button: "Salvar Localização",
    location_set: "A localização foi definida!",
    load_error: "Erro ao ler a localização atual",
    save_error: "Erro ao definir a localização",
    set_heading: "A seguinte localização foi definida nas configurações do driver:",
    read_heading: "A seguinte localização está definida nas configurações do driver:",
    query_heading: "A seguinte localização foi retornada pela API de localização do Windows:",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_locale() {
        assert_eq!(Language::from_locale("pt_BR.UTF-8"), Language::Portuguese);
        assert_eq!(Language::from_locale("PT-pt"), Language::Portuguese);
        assert_eq!(Language::from_locale("en_US.UTF-8"), Language::English);
        assert_eq!(Language::from_locale("C"), Language::English);
        assert_eq!(Language::from_locale(""), Language::English);
    }

    #[test]
    fn test_windows_display_language_without_locale_variables() {
        assert_eq!(
            Language::detect_with(Some("pt-BR".to_string()), |_| None),
            Language::Portuguese
        );
        assert_eq!(
            Language::detect_with(Some("en-US".to_string()), |_| Some("pt_BR.UTF-8".to_string())),
            Language::English
        );
    }

    #[test]
    fn test_locale_variables_are_the_fallback() {
        let env = |var: &str| match var {
            "LANG" => Some("pt_PT.UTF-8".to_string()),
            "LC_ALL" => Some(String::new()),
            _ => None,
        };
        assert_eq!(Language::detect_with(None, env), Language::Portuguese);
        assert_eq!(Language::detect_with(None, |_| None), Language::English);
    }

    #[test]
    fn test_button_text() {
        assert_eq!(Language::English.strings().save_button, "Set Location");
        assert_eq!(Language::Portuguese.strings().load_button, "Carregar Localização");
    }
}
