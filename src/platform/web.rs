//! wasm-bindgen surface for the browser host

use wasm_bindgen::prelude::*;

use crate::auth::AuthManager;
use crate::game::Game;
use crate::items::ItemKind;
use crate::persistence::LocalStorage;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Circle Survivor loaded");
}

fn seed() -> u64 {
    js_sys::Date::now() as u64 ^ (js_sys::Math::random() * u32::MAX as f64) as u64
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize for host: {e}");
        "null".to_string()
    })
}

/// Game handle owned by the page
#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorage>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        WebGame {
            game: Game::new(LocalStorage::new(), seed()),
        }
    }

    /// Start a run; false if one is already running
    pub fn start(&mut self) -> bool {
        self.game.start(seed()).is_ok()
    }

    pub fn stop(&mut self) -> bool {
        self.game.stop().is_ok()
    }

    pub fn update(&mut self, dt: f32) {
        self.game.update(dt);
    }

    pub fn handle_input(&mut self, key: &str, pressed: bool) {
        self.game.handle_input(key, pressed);
    }

    /// Buy an item by its inventory name; false when unknown or unaffordable
    pub fn buy(&mut self, item: &str) -> bool {
        let Some(item) = ItemKind::from_str(item) else {
            log::warn!("Unknown store item {item:?}");
            return false;
        };
        self.game.buy(item).is_ok()
    }

    pub fn accept_revive(&mut self) -> bool {
        self.game.accept_revive().is_ok()
    }

    pub fn decline_revive(&mut self) -> bool {
        self.game.decline_revive().is_ok()
    }

    /// Record the run; returns an error message for the host to show
    pub fn submit_name(&mut self, name: &str) -> Result<(), JsError> {
        self.game.submit_name(name)?;
        Ok(())
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.game.toggle_mute()
    }

    pub fn phase(&self) -> String {
        self.game.phase().as_str().to_string()
    }

    pub fn score(&self) -> f32 {
        self.game.state().score
    }

    pub fn coins(&self) -> f64 {
        self.game.wallet().coins as f64
    }

    /// Store shelf: label, price, owned count and affordability per item
    pub fn store_catalog_json(&self) -> String {
        to_json(&self.game.wallet().catalog())
    }

    pub fn inventory_json(&self) -> String {
        to_json(&self.game.wallet().inventory)
    }

    pub fn settings_json(&self) -> String {
        to_json(self.game.settings())
    }

    pub fn leaderboard_json(&self) -> String {
        to_json(self.game.high_scores())
    }

    pub fn frame_json(&self) -> String {
        to_json(&self.game.frame())
    }

    /// Events since the last call, for sounds and HUD flashes
    pub fn events_json(&mut self) -> String {
        to_json(&self.game.drain_events())
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Account handle owned by the page
#[wasm_bindgen]
pub struct WebAuth {
    auth: AuthManager<LocalStorage>,
}

#[wasm_bindgen]
impl WebAuth {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebAuth {
        WebAuth {
            auth: AuthManager::new(LocalStorage::new()),
        }
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<(), JsError> {
        self.auth.register(username, password)?;
        Ok(())
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), JsError> {
        self.auth.login(username, password)?;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.auth.logout();
    }

    pub fn current_user(&self) -> Option<String> {
        self.auth.current_user().map(str::to_string)
    }
}

impl Default for WebAuth {
    fn default() -> Self {
        Self::new()
    }
}
