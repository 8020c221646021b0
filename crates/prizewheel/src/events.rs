use wheelspin::PrizeColor;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Spin,
    Show,
    ConfigReload,
    Celebrate(PrizeColor),
}
