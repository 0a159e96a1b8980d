//! Library side of the `agri` CLI: terminal speech collaborators, plain-text rendering of
//! dashboard data, and assistant construction from [`config::Settings`].

mod display;
mod session;
mod terminal;

pub use display::{
    render_calendar, render_diagnosis, render_history, render_notice, render_pests,
    render_prices, render_profile, render_subsidies, render_turn, render_weather,
};
pub use session::{open_assistant, SessionError, SessionOptions};
pub use terminal::{ConsoleSynthesizer, StdinRecognizer};
