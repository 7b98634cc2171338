//! Localized texts and callback identifiers for the menu flow.

use pricefeed_core::Language;

pub const CB_TOKEN_PRICE: &str = "token_price";

pub struct Texts {
    pub welcome: &'static str,
    pub token_price: &'static str,
    pub token_app: &'static str,
    pub token_price_message: &'static str,
    pub language_selection: &'static str,
    pub english: &'static str,
    pub spanish: &'static str,
    /// Shown when the handoff cannot be completed.
    pub failure: &'static str,
}

static ES: Texts = Texts {
    welcome: "¡Bienvenido a onChain Price Feeds Bot! Puedo ayudarte con la informacion del costo de tokens. \nPor favor selecciona una opción:",
    token_price: "Precio de tokens",
    token_app: "App de tokens",
    token_price_message: "Aquí hay algunos tokens a selecionar:",
    language_selection: "Por favor seleccione su idioma / Please select your language:",
    english: "English",
    spanish: "Español",
    failure: "Lo sentimos, algo salió mal. Por favor intenta de nuevo más tarde.",
};

static EN: Texts = Texts {
    welcome: "Welcome to onChain Price Feeds Bot! I can help you with token price information. \nPlease select an option:",
    token_price: "Token Price",
    token_app: "Token App",
    token_price_message: "Here are some tokens to select:",
    language_selection: "Please select your language / Please select your language:",
    english: "English",
    spanish: "Español",
    failure: "Sorry, something went wrong. Please try again later.",
};

pub fn texts(lang: Language) -> &'static Texts {
    match lang {
        Language::Es => &ES,
        Language::En => &EN,
    }
}
