use crate::config;
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, CELEBRATION, WHEEL_SIZE, WheelRenderer, WheelState};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use wheelspin::{PrizeColor, SpinId};

pub struct AppModel {
    pub state: Rc<RefCell<WheelState>>,
    pub spinning: bool,
    pub winner_text: String,
    pub counter_text: String,
    pub duration_text: String,
    pub history_text: String,
    pub events_tx: async_channel::Sender<AppEvent>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    pub progress_bar: gtk::ProgressBar,
}

#[derive(Debug)]
pub enum AppMsg {
    Spin,
    SpinFinished(SpinId),
    Celebrate(PrizeColor),
    CelebrationEnded,
    Show,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Spin => AppMsg::Spin,
            AppEvent::Show => AppMsg::Show,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::Celebrate(color) => AppMsg::Celebrate(color),
        }
    }
}

impl AppModel {
    fn sync_labels(&mut self) {
        let state = self.state.borrow();
        self.spinning = state.session.is_spinning();
        self.winner_text = state.winner_text();
        self.counter_text = state.counter_text();
        self.duration_text = state.duration_text();
        self.history_text = state.history_text();
    }

    /// Redraws every frame until the spin settles.
    fn animate(&self) {
        let state = self.state.clone();
        let progress_bar = self.progress_bar.clone();
        self.drawing_area.add_tick_callback(move |area, _| {
            area.queue_draw();
            let state = state.borrow();
            progress_bar.set_fraction(state.progress(Instant::now()));
            if state.session.is_spinning() {
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        WheelState,
        async_channel::Sender<AppEvent>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Prize Wheel"),
            set_default_size: (560, 820),
            add_css_class: "wheel-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::space {
                        sender.input(AppMsg::Spin);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_all: 16,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_content_width: WHEEL_SIZE as i32,
                    set_content_height: WHEEL_SIZE as i32,
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "wheel-drawing-area",
                },

                gtk::Button {
                    set_label: "Spin",
                    set_halign: gtk::Align::Center,
                    #[watch]
                    set_sensitive: !model.spinning,
                    connect_clicked => AppMsg::Spin,
                },

                gtk::Label {
                    add_css_class: "wheel-winner",
                    #[watch]
                    set_label: &model.winner_text,
                },

                gtk::Label {
                    #[watch]
                    set_label: &model.counter_text,
                },

                #[name = "progress_bar"]
                gtk::ProgressBar {
                    set_halign: gtk::Align::Center,
                    set_width_request: 240,
                    #[watch]
                    set_visible: model.spinning,
                },

                gtk::Label {
                    #[watch]
                    set_label: &model.duration_text,
                },

                gtk::Label {
                    add_css_class: "wheel-history",
                    set_halign: gtk::Align::Start,
                    #[watch]
                    set_label: &model.history_text,
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, events_tx, rx) = init;

        theme::load_css();

        let state = Rc::new(RefCell::new(state));

        let mut model = AppModel {
            state: state.clone(),
            spinning: false,
            winner_text: String::new(),
            counter_text: String::new(),
            duration_text: String::new(),
            history_text: String::new(),
            events_tx,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            progress_bar: gtk::ProgressBar::default(),
        };
        model.sync_labels();

        let widgets = view_output!();

        model.drawing_area = widgets.drawing_area.clone();
        model.progress_bar = widgets.progress_bar.clone();

        let state_draw = model.state.clone();
        let renderer = Rc::new(RefCell::new(WheelRenderer::new()));
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let state = state_draw.borrow();
                let now = Instant::now();

                let mut renderer = renderer.borrow_mut();
                let result = renderer
                    .surface(&state.prizes, drawing_area.scale_factor(), &colors)
                    .and_then(|face| {
                        wheel::draw(
                            cr,
                            face,
                            state.session.visible_angle(now),
                            width,
                            height,
                            &colors,
                            state.celebration_color(now),
                        )
                    });
                if let Err(e) = result {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Spin => {
                let ticket = self
                    .state
                    .borrow_mut()
                    .spin(Instant::now(), &mut rand::thread_rng());
                let Some(ticket) = ticket else {
                    log::debug!("Spin ignored, the wheel is already turning");
                    return;
                };

                log::info!(
                    "{} started, {} ms to land on {}",
                    ticket.id,
                    ticket.duration.as_millis(),
                    ticket.target
                );
                let id = ticket.id;
                glib::timeout_add_local_once(ticket.duration.as_duration(), move || {
                    sender.input(AppMsg::SpinFinished(id));
                });
                self.animate();
                self.sync_labels();
            }
            AppMsg::SpinFinished(id) => {
                let Some(outcome) = self.state.borrow_mut().finish(id) else {
                    log::warn!("Completion for {} arrived with no matching spin", id);
                    return;
                };

                log::info!("{} won {}", outcome.id, outcome.winner.name);
                if let Err(e) = self
                    .events_tx
                    .try_send(AppEvent::Celebrate(outcome.celebration_color()))
                {
                    log::warn!("Could not trigger the celebration: {}", e);
                }
                self.sync_labels();
                self.drawing_area.queue_draw();
            }
            AppMsg::Celebrate(color) => {
                self.state.borrow_mut().celebrate(color, Instant::now());
                glib::timeout_add_local_once(CELEBRATION, move || {
                    sender.input(AppMsg::CelebrationEnded);
                });
                self.drawing_area.queue_draw();
            }
            AppMsg::CelebrationEnded => {
                self.state.borrow_mut().end_celebration(Instant::now());
                self.drawing_area.queue_draw();
            }
            AppMsg::Show => self.root.present(),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let mut state = self.state.borrow_mut();
                    state.set_duration(new_config.spin_duration_ms);
                    match new_config.prize_list() {
                        Ok(prizes) => {
                            if !state.replace_prizes(prizes) {
                                log::info!("Prize list will change once the current spin ends");
                            }
                        }
                        Err(e) => log::error!("Keeping the previous prize list: {}", e),
                    }
                    drop(state);

                    self.sync_labels();
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
