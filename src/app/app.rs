use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};

use crate::{
    app::{
        Session,
        ui::{self, ChartView},
    },
    models::Metric,
};

pub struct App {
    session: Session,
    table_state: TableState,
    popup_message: Option<String>,
    metric: Metric,
    view: ChartView,
}

impl App {
    pub fn new(session: Session) -> Self {
        let mut table_state = TableState::default();
        if session.portfolio().is_some_and(|p| !p.lots().is_empty()) {
            table_state.select(Some(0));
        }
        Self {
            session,
            table_state,
            popup_message: None,
            metric: Metric::default(),
            view: ChartView::default(),
        }
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| {
            ui::render(
                frame,
                &self.session,
                &mut self.table_state,
                self.metric,
                self.view,
                &self.popup_message,
            )
        })?;
        Ok(())
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.draw(terminal)?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Left => self.switch_source(terminal, -1).await?,
                    KeyCode::Right => self.switch_source(terminal, 1).await?,
                    KeyCode::Char('r') => {
                        self.show_popup("Reloading portfolio...");
                        self.draw(terminal)?;
                        // failures are kept on the session and shown in the status line
                        let _ = self.session.reload().await;
                        self.clear_popup();
                        self.reset_selection();
                    }
                    KeyCode::Char('u') => {
                        if let Some(asset_id) = self.selected_asset() {
                            self.show_popup(&format!("Updating {}...", asset_id));
                            self.draw(terminal)?;
                            let _ = self.session.refresh_lot(&asset_id).await;
                            self.clear_popup();
                        }
                    }
                    KeyCode::Char('m') => self.metric = self.metric.next(),
                    KeyCode::Char('v') => {
                        self.view = match self.view {
                            ChartView::Lot => ChartView::Portfolio,
                            ChartView::Portfolio => ChartView::Lot,
                        }
                    }
                    KeyCode::Down => self.move_selection(1),
                    KeyCode::Up => self.move_selection(-1),
                    _ => {}
                }
            }
        }
    }

    async fn switch_source<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        step: isize,
    ) -> Result<()> {
        let Some(label) = self.session.neighbour_source(step) else {
            return Ok(());
        };

        self.show_popup(&format!("Loading {}...", label));
        self.draw(terminal)?;
        let _ = self.session.select(&label).await;
        self.clear_popup();
        self.reset_selection();

        Ok(())
    }

    /// Moves the highlighted lot by `step`, wrapping at both ends.
    fn move_selection(&mut self, step: isize) {
        let len = self.lot_count() as isize;
        if len == 0 {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) => (i as isize + step).rem_euclid(len),
            None => 0,
        };
        self.table_state.select(Some(next as usize));
    }

    fn lot_count(&self) -> usize {
        self.session
            .portfolio()
            .map(|p| p.lots().len())
            .unwrap_or(0)
    }

    fn selected_asset(&self) -> Option<String> {
        let i = self.table_state.selected()?;
        let portfolio = self.session.portfolio()?;
        portfolio.lots().get(i).map(|lot| lot.asset_id().clone())
    }

    fn reset_selection(&mut self) {
        if self.lot_count() > 0 {
            self.table_state.select(Some(0));
        } else {
            self.table_state.select(None);
        }
    }
}
