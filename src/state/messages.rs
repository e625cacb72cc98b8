use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum PersistResponse {
    Saved,
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    Tick,
}
