#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    ToggleLock,
    Index,
    Counter,
    FetchData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexAction {
    ExitConfirm,
    FetchDataDialog,
    CounterDialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    Increment,
    Decrement,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastAction {
    Reload,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Confirm,
    Cancel,
    Close,
}
