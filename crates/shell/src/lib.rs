//! Window shell for `fwd-dash`.
//!
//! Owns the Iced application loop and wires together:
//! - one-shot module detection (picks the field set for everything else)
//! - the stats poll timer feeding the chart
//! - the config editor's round trips
//! - the settings file watcher (live theme reload)

use chrono::Local;
use fwd_client::{ops, Backend, HttpBackend};
use fwd_config::{default_path, load as load_config, ConfigWatcher, DashConfig};
use fwd_core::{Message, ModuleKind, Sample, Tab, HISTORY_CAPACITY, POLL_INTERVAL_MS};
use fwd_renderer::{ChartModel, ChartSurface};
use fwd_stats::{ModuleDetector, ModuleProfile, PollOutcome, StatsPoller};
use fwd_theme::Theme;
use fwd_widgets::{tab_bar, ConfigEditor, EditorStatus, StatsWidget};
use futures::channel::mpsc::Sender;
use iced::{
    widget::{column, container, row, rule, scrollable, text, Space},
    Alignment, Element, Length, Size, Subscription, Task,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the dashboard window.  Returns when the window is closed.
pub fn run(config: DashConfig) -> iced::Result {
    let size = Size::new(config.window.width as f32, config.window.height as f32);

    iced::application(
        move || Dashboard::new(config.clone()),
        Dashboard::update,
        Dashboard::view,
    )
    .title("Forwarder Dashboard")
    .subscription(Dashboard::subscription)
    .style(Dashboard::style)
    .window_size(size)
    .run()
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Dashboard {
    settings:     DashConfig,
    theme:        Theme,
    backend:      Arc<dyn Backend>,
    tab:          Tab,
    // Detection
    detector:     ModuleDetector,
    detecting:    bool,
    detect_error: Option<String>,
    profile:      Option<ModuleProfile>,
    // Statistics
    poller:       StatsPoller,
    surface:      ChartSurface,
    stats:        StatsWidget,
    // Configuration
    editor:       Option<ConfigEditor>,
}

impl Dashboard {
    fn new(settings: DashConfig) -> (Self, Task<Message>) {
        let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&settings.backend));
        info!(backend = %settings.backend.base_url, "dashboard starting");

        let mut dashboard = Self::with_backend(settings, backend);
        let detect = dashboard.detect();
        (dashboard, detect)
    }

    fn with_backend(settings: DashConfig, backend: Arc<dyn Backend>) -> Self {
        let theme = Theme::from_config(&settings.theme);

        Self {
            surface:      ChartSurface::new(theme.chart_style()),
            stats:        StatsWidget::new(settings.window.chart_height as f32),
            theme,
            backend,
            tab:          Tab::default(),
            detector:     ModuleDetector::new(),
            detecting:    false,
            detect_error: None,
            profile:      None,
            poller:       StatsPoller::new(HISTORY_CAPACITY),
            editor:       None,
            settings,
        }
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Detected(Ok(sample)) => {
                self.detecting = false;
                return self.on_detected(&sample);
            }
            Message::Detected(Err(e)) => {
                self.detecting = false;
                if self.profile.is_none() {
                    warn!("Module detection failed: {e}");
                    self.detect_error = Some(e);
                }
            }
            Message::PollTick => return self.on_tick(),
            Message::StatsFetched { seq, result } => {
                if self.poller.apply(seq, Local::now(), result) == PollOutcome::Appended {
                    self.redraw_chart();
                }
            }
            Message::ConfigLoaded(result) => {
                if let Some(editor) = &mut self.editor {
                    match result {
                        Ok(state) => editor.replace(state),
                        Err(e)    => editor.set_status(EditorStatus::Error(e)),
                    }
                }
            }
            Message::ConfigSaved(result) => {
                if let Some(editor) = &mut self.editor {
                    editor.set_status(match result {
                        Ok(())  => EditorStatus::Saved,
                        Err(e)  => EditorStatus::Error(e),
                    });
                }
            }
            Message::SettingsReloaded => self.reload_settings(),
            Message::TabSelected(tab) => {
                self.tab = tab;
                match tab {
                    Tab::Statistics    => self.redraw_chart(),
                    Tab::Configuration => self.surface.release(),
                }
            }
            Message::FieldToggled { field, value } => {
                if let Some(editor) = &mut self.editor {
                    editor.toggle(&field, value);
                }
            }
            Message::FieldEdited { field, value } => {
                if let Some(editor) = &mut self.editor {
                    editor.edit(&field, value);
                }
            }
            Message::Apply   => return self.save_config(),
            Message::Refresh => return self.load_config(),
            Message::Reload  => return self.reload_config(),
            Message::PauseToggled => {
                if self.poller.is_active() {
                    self.poller.deactivate();
                    self.surface.release();
                } else {
                    self.poller.activate();
                    self.redraw_chart();
                }
            }
        }
        Task::none()
    }

    fn on_detected(&mut self, sample: &Sample) -> Task<Message> {
        if self.profile.is_some() {
            return Task::none();
        }

        let kind = self.detector.observe(sample);
        let Some(profile) = self.detector.profile() else {
            return Task::none();
        };
        info!(?kind, "attached to module");

        self.profile = Some(profile);
        self.detect_error = None;
        self.editor = Some(ConfigEditor::new(profile.config_fields));
        self.poller.activate();
        self.redraw_chart();

        self.load_config()
    }

    fn on_tick(&mut self) -> Task<Message> {
        if self.profile.is_none() {
            if self.detecting {
                return Task::none();
            }
            return self.detect();
        }

        let Some(seq) = self.poller.begin_fetch() else {
            return Task::none();
        };
        debug!(seq, "polling stats");

        let backend = Arc::clone(&self.backend);
        Task::perform(
            async move { backend.stats().await.map_err(|e| e.to_string()) },
            move |result| Message::StatsFetched { seq, result },
        )
    }

    /// Issue the classification fetch.  At most one is in flight.
    fn detect(&mut self) -> Task<Message> {
        self.detecting = true;
        let backend = Arc::clone(&self.backend);
        Task::perform(
            async move { backend.stats().await.map_err(|e| e.to_string()) },
            Message::Detected,
        )
    }

    /// Rebuild the chart from the current buffer.  Skipped while the chart is
    /// not on screen.
    fn redraw_chart(&mut self) {
        let Some(profile) = self.profile else {
            return;
        };
        if self.tab != Tab::Statistics || !self.poller.is_active() {
            return;
        }

        match ChartModel::from_snapshot(self.poller.buffer(), profile.datasets, Local::now()) {
            Ok(chart) => self.surface.redraw(chart),
            Err(e) => warn!("Chart rebuild failed: {e}"),
        }
    }

    // ── Config round trips ────────────────────────────────────────────────────

    fn load_config(&mut self) -> Task<Message> {
        let Some(editor) = &mut self.editor else {
            return Task::none();
        };
        editor.set_status(EditorStatus::Loading);

        let backend = Arc::clone(&self.backend);
        Task::perform(
            async move { ops::load(backend.as_ref()).await.map_err(|e| e.to_string()) },
            Message::ConfigLoaded,
        )
    }

    fn save_config(&mut self) -> Task<Message> {
        let Some(editor) = &self.editor else {
            return Task::none();
        };
        let config = editor.snapshot();

        let backend = Arc::clone(&self.backend);
        Task::perform(
            async move { ops::save(backend.as_ref(), config).await.map_err(|e| e.to_string()) },
            Message::ConfigSaved,
        )
    }

    fn reload_config(&mut self) -> Task<Message> {
        let Some(editor) = &mut self.editor else {
            return Task::none();
        };
        editor.set_status(EditorStatus::Loading);

        let backend = Arc::clone(&self.backend);
        Task::perform(
            async move {
                ops::reload_then_load(backend.as_ref())
                    .await
                    .map_err(|e| e.to_string())
            },
            Message::ConfigLoaded,
        )
    }

    fn reload_settings(&mut self) {
        match load_config(default_path()) {
            Ok(cfg) => {
                info!("Settings reloaded");
                if cfg.backend.base_url != self.settings.backend.base_url {
                    warn!("Backend URL changes take effect after a restart");
                }
                self.theme = Theme::from_config(&cfg.theme);
                self.surface.set_style(self.theme.chart_style());
                self.settings.theme = cfg.theme;
            }
            Err(e) => warn!("Settings reload failed: {e}"),
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let pad = self.theme.padding;
        let gap = self.theme.gap as f32;

        let (Some(profile), Some(editor)) = (self.profile, &self.editor) else {
            return self.view_connecting();
        };

        let body: Element<'_, Message> = match self.tab {
            Tab::Statistics    => self.stats.view(&self.surface, &self.poller, &self.theme),
            Tab::Configuration => editor.view(&self.theme),
        };

        let header = row![
            tab_bar(self.tab, self.theme.font_size),
            Space::new().width(Length::Fill),
            text(kind_label(profile.kind))
                .size(self.theme.font_size)
                .color(self.theme.accent.to_iced()),
        ]
        .align_y(Alignment::Center);

        column![
            header,
            rule::horizontal(1.0f32),
            scrollable(container(body).padding([8, 0])).height(Length::Fill),
        ]
        .padding(pad)
        .spacing(gap)
        .into()
    }

    /// Shown until the module has been classified.
    fn view_connecting(&self) -> Element<'_, Message> {
        let mut lines = column![text(format!(
            "Connecting to {}…",
            self.settings.backend.base_url
        ))
        .size(self.theme.font_size)]
        .spacing(self.theme.gap as f32);

        if let Some(e) = &self.detect_error {
            lines = lines.push(
                text(format!("✗ {e}"))
                    .size(self.theme.font_size)
                    .color(self.theme.foreground.with_alpha(0.6).to_iced()),
            );
        }

        container(lines)
            .padding(self.theme.padding)
            .width(Length::Fill)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![Subscription::run(settings_stream)];

        // Before detection the timer paces detection retries; afterwards it
        // exists only while the poller is active.
        if self.profile.is_none() || self.poller.is_active() {
            subs.push(
                iced::time::every(Duration::from_millis(POLL_INTERVAL_MS))
                    .map(|_| Message::PollTick),
            );
        }

        Subscription::batch(subs)
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color: self.theme.foreground.to_iced(),
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────

/// Watches the settings file for writes and sends `SettingsReloaded`.
fn settings_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::SettingsReloaded);
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn kind_label(kind: ModuleKind) -> &'static str {
    match kind {
        ModuleKind::Dispatcher => "Dispatcher",
        ModuleKind::Collector  => "Collector",
        ModuleKind::Unknown    => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fwd_core::{ConfigState, Result};

    struct NullBackend;

    #[async_trait]
    impl Backend for NullBackend {
        async fn stats(&self) -> Result<Sample> {
            Ok(Sample::default())
        }

        async fn get_config(&self) -> Result<ConfigState> {
            Ok(ConfigState::new())
        }

        async fn save_config(&self, _config: &ConfigState) -> Result<()> {
            Ok(())
        }

        async fn reload_config(&self) -> Result<()> {
            Ok(())
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::with_backend(DashConfig::default(), Arc::new(NullBackend))
    }

    fn collector_sample(disk: f64) -> Sample {
        Sample::from_iter([("RawDiskBytes", disk), ("CompressedNetBytes", disk / 2.0)])
    }

    fn attached() -> Dashboard {
        let mut d = dashboard();
        let _ = d.update(Message::Detected(Ok(collector_sample(0.0))));
        assert!(!d.detecting);
        d
    }

    fn poll(d: &mut Dashboard, sample: Sample) {
        let seq = d.poller.begin_fetch().unwrap();
        let _ = d.update(Message::StatsFetched { seq, result: Ok(sample) });
    }

    #[test]
    fn nothing_is_polled_before_detection() {
        let mut d = dashboard();
        let _ = d.update(Message::PollTick);
        assert!(d.profile.is_none());
        assert!(!d.poller.is_active());
    }

    #[test]
    fn ticks_wait_for_the_pending_detection() {
        let mut d = dashboard();
        let _ = d.update(Message::PollTick);
        assert!(d.detecting);
        let _ = d.update(Message::PollTick);
        assert!(d.detecting);

        let _ = d.update(Message::Detected(Err("connection refused".into())));
        assert!(!d.detecting);
        let _ = d.update(Message::PollTick);
        assert!(d.detecting);
    }

    #[test]
    fn each_tick_issues_one_stats_fetch() {
        let mut d = attached();
        let _ = d.update(Message::PollTick);
        assert_eq!(d.poller.begin_fetch(), Some(1));
        let _ = d.update(Message::PollTick);
        assert_eq!(d.poller.begin_fetch(), Some(3));
    }

    #[test]
    fn detection_picks_profile_and_starts_polling() {
        let d = attached();
        assert_eq!(d.profile.map(|p| p.kind), Some(ModuleKind::Collector));
        assert!(d.poller.is_active());
        assert_eq!(d.editor.as_ref().map(|e| e.status()), Some(&EditorStatus::Loading));
    }

    #[test]
    fn second_detection_result_is_ignored() {
        let mut d = attached();
        let _ = d.update(Message::Detected(Ok(Sample::from_iter([("RawNetBytes", 1.0)]))));
        assert_eq!(d.detector.kind(), ModuleKind::Collector);
    }

    #[test]
    fn failed_detection_is_reported() {
        let mut d = dashboard();
        let _ = d.update(Message::Detected(Err("connection refused".into())));
        assert_eq!(d.detect_error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn each_appended_sample_rebuilds_the_chart() {
        let mut d = attached();
        let before = d.surface.generation();
        poll(&mut d, collector_sample(10.0));
        poll(&mut d, collector_sample(20.0));
        assert_eq!(d.poller.buffer().len(), 2);
        assert_eq!(d.surface.generation(), before + 2);
    }

    #[test]
    fn failed_poll_does_not_redraw() {
        let mut d = attached();
        let before = d.surface.generation();
        let _ = d.update(Message::StatsFetched { seq: 0, result: Err("timeout".into()) });
        assert_eq!(d.surface.generation(), before);
        assert_eq!(d.poller.last_error(), Some("timeout"));
    }

    #[test]
    fn pause_discards_history_and_releases_chart() {
        let mut d = attached();
        poll(&mut d, collector_sample(10.0));
        let _ = d.update(Message::PauseToggled);
        assert!(!d.poller.is_active());
        assert!(d.poller.buffer().is_empty());
        assert!(!d.surface.is_bound());

        let _ = d.update(Message::PauseToggled);
        assert!(d.poller.is_active());
        assert!(d.surface.is_bound());
    }

    #[test]
    fn leaving_statistics_tab_releases_chart() {
        let mut d = attached();
        let _ = d.update(Message::TabSelected(Tab::Configuration));
        assert!(!d.surface.is_bound());
        poll(&mut d, collector_sample(10.0));
        assert!(!d.surface.is_bound());
        assert_eq!(d.poller.buffer().len(), 1);

        let _ = d.update(Message::TabSelected(Tab::Statistics));
        assert!(d.surface.is_bound());
    }

    #[test]
    fn config_load_and_edit_flow() {
        let mut d = attached();
        let state = ConfigState::from([("Verbose".to_string(), fwd_core::ConfigValue::Bool(false))]);
        let _ = d.update(Message::ConfigLoaded(Ok(state)));
        let _ = d.update(Message::FieldToggled { field: "Verbose".into(), value: true });
        let editor = d.editor.as_ref().unwrap();
        assert_eq!(editor.state()["Verbose"], fwd_core::ConfigValue::Bool(true));
        assert_eq!(editor.status(), &EditorStatus::Idle);
    }

    #[test]
    fn save_result_feeds_status_line() {
        let mut d = attached();
        let _ = d.update(Message::ConfigSaved(Err("HTTP 500".into())));
        assert_eq!(
            d.editor.as_ref().unwrap().status(),
            &EditorStatus::Error("HTTP 500".into())
        );
    }
}
