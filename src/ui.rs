use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::{io, time::Duration};
use textwrap::wrap;
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::utils::format_ts;
use crmbox::directory::Directory;
use crmbox::instances::InstanceStore;
use crmbox::metrics;
use crmbox::models::{Chat, ChatStatus, InstanceStatus, Message, MessageStatus, Role, Route};
use crmbox::session::SessionStore;
use crmbox::store::ConversationStore;

// Export types needed by main module
pub use ratatui::backend::CrosstermBackend;
pub use ratatui::Terminal;

/// Everything the UI reads from and the event loop mutates. The stores are
/// only ever touched through their methods; the UI itself holds no copy of
/// chat or user data.
pub struct AppState {
    pub directory: Directory,
    pub chats: ConversationStore,
    pub instances: InstanceStore,
    pub session: SessionStore,
}

/// A mutation or navigation request produced by one key event. The event
/// loop in main.rs applies it to the stores.
#[derive(Debug)]
pub enum UiAction {
    Quit,
    Login { email: String, secret: String, role: Role },
    Logout,
    SelectChat(String),
    SendMessage { chat_id: String, text: String },
    SetStatus { chat_id: String, status: ChatStatus },
    Reassign { chat_id: String, user_id: String },
    CreateUser { name: String, email: String, secret: String },
    UpdateUser { user_id: String, name: String, email: String, secret: Option<String> },
    DeleteUser(String),
    CreateInstance,
    GenerateToken(String),
    ToggleInstance(String),
    DeleteInstance(String),
    UpdateProfile { name: String, email: String },
    ChangeSecret { current: String, new_secret: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Inbox,
    Dashboard,
    Team,
    Instances,
    Profile,
}

impl Screen {
    fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Inbox => "Inbox",
            Screen::Dashboard => "Dashboard",
            Screen::Team => "Team",
            Screen::Instances => "Instances",
            Screen::Profile => "Profile",
        }
    }
}

enum InboxFocus {
    Chats,
    Compose,
}

struct LoginForm {
    email: Input,
    secret: Input,
    secret_focused: bool,
    role: Role,
}

impl LoginForm {
    fn new() -> Self {
        LoginForm {
            email: Input::default(),
            secret: Input::default(),
            secret_focused: false,
            role: Role::Admin,
        }
    }
}

struct StatusDialog {
    chat_id: String,
    selected: usize,
}

const STATUS_OPTIONS: [ChatStatus; 3] =
    [ChatStatus::Open, ChatStatus::InProgress, ChatStatus::Closed];

struct ReassignDialog {
    chat_id: String,
    /// (user id, display name) snapshot taken when the dialog opened.
    candidates: Vec<(String, String)>,
    selected: usize,
}

struct UserFormDialog {
    /// Some(user id) when editing an existing team member.
    editing: Option<String>,
    name: Input,
    email: Input,
    secret: Input,
    field: usize,
}

struct ProfileDialog {
    name: Input,
    email: Input,
    email_focused: bool,
}

struct SecretDialog {
    current: Input,
    new_secret: Input,
    confirm: Input,
    field: usize,
}

struct ConfirmDialog {
    title: String,
    body: Vec<String>,
    action: ConfirmAction,
}

enum ConfirmAction {
    DeleteUser(String),
    CreateInstance,
    DeleteInstance(String),
}

pub struct Ui {
    screen: Screen,
    login: LoginForm,
    inbox_focus: InboxFocus,
    chat_index: usize,
    compose: Input,
    search: Input,
    searching: bool,
    team_index: usize,
    instance_index: usize,
    status_dialog: Option<StatusDialog>,
    reassign_dialog: Option<ReassignDialog>,
    user_dialog: Option<UserFormDialog>,
    profile_dialog: Option<ProfileDialog>,
    secret_dialog: Option<SecretDialog>,
    confirm_dialog: Option<ConfirmDialog>,
    help_open: bool,
    notice: Option<String>,
}

impl Ui {
    pub fn new(start: Screen) -> Self {
        Ui {
            screen: start,
            login: LoginForm::new(),
            inbox_focus: InboxFocus::Chats,
            chat_index: 0,
            compose: Input::default(),
            search: Input::default(),
            searching: false,
            team_index: 0,
            instance_index: 0,
            status_dialog: None,
            reassign_dialog: None,
            user_dialog: None,
            profile_dialog: None,
            secret_dialog: None,
            confirm_dialog: None,
            help_open: false,
            notice: None,
        }
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
        if screen == Screen::Login {
            self.login = LoginForm::new();
        }
    }

    fn role(&self, state: &AppState) -> Option<Role> {
        state.session.current().map(|u| u.role)
    }

    /// Chats visible in the inbox list, after the search filter.
    fn visible_chats<'a>(&self, state: &'a AppState) -> Vec<&'a Chat> {
        let term = self.search.value().to_lowercase();
        state
            .chats
            .chats()
            .iter()
            .filter(|c| {
                term.is_empty()
                    || c.name.to_lowercase().contains(&term)
                    || c.last_message.to_lowercase().contains(&term)
            })
            .collect()
    }

    fn goto(&mut self, state: &AppState, screen: Screen) {
        let admin_only = matches!(screen, Screen::Team | Screen::Instances);
        if admin_only && self.role(state) != Some(Role::Admin) {
            self.set_notice("That screen is admin-only");
            return;
        }
        self.screen = screen;
    }

    /// Polls for one key event and translates it into an optional action.
    /// An open dialog takes priority over the active screen.
    pub fn handle_input(&mut self, state: &AppState) -> Result<Option<UiAction>> {
        if !event::poll(Duration::from_millis(10))? {
            return Ok(None);
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => return Ok(None),
        };
        self.notice = None;

        if self.help_open {
            // Any key closes the help popup
            self.help_open = false;
            return Ok(None);
        }
        if self.confirm_dialog.is_some() {
            return Ok(self.handle_confirm_key(key.code));
        }
        if self.status_dialog.is_some() {
            return Ok(self.handle_status_key(key.code));
        }
        if self.reassign_dialog.is_some() {
            return Ok(self.handle_reassign_key(key.code));
        }
        if self.user_dialog.is_some() {
            return Ok(self.handle_user_form_key(key));
        }
        if self.profile_dialog.is_some() {
            return Ok(self.handle_profile_key(key));
        }
        if self.secret_dialog.is_some() {
            return Ok(self.handle_secret_key(key));
        }

        if self.screen == Screen::Login {
            return Ok(self.handle_login_key(key));
        }

        let ctrl = key.modifiers.contains(event::KeyModifiers::CONTROL);
        if ctrl {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(UiAction::Quit)),
                KeyCode::Char('l') => return Ok(Some(UiAction::Logout)),
                KeyCode::Char('b') => {
                    self.goto(state, Screen::Inbox);
                    return Ok(None);
                }
                KeyCode::Char('d') => {
                    self.goto(state, Screen::Dashboard);
                    return Ok(None);
                }
                KeyCode::Char('t') => {
                    self.goto(state, Screen::Team);
                    return Ok(None);
                }
                KeyCode::Char('w') => {
                    self.goto(state, Screen::Instances);
                    return Ok(None);
                }
                KeyCode::Char('p') => {
                    self.goto(state, Screen::Profile);
                    return Ok(None);
                }
                KeyCode::Char('h') => {
                    self.help_open = true;
                    return Ok(None);
                }
                _ => {}
            }
        }

        match self.screen {
            Screen::Inbox => Ok(self.handle_inbox_key(state, key)),
            Screen::Team => Ok(self.handle_team_key(state, key.code)),
            Screen::Instances => Ok(self.handle_instances_key(state, key.code)),
            Screen::Profile => Ok(self.handle_profile_screen_key(state, key.code)),
            Screen::Dashboard => {
                if key.code == KeyCode::Esc {
                    return Ok(Some(UiAction::Quit));
                }
                Ok(None)
            }
            Screen::Login => Ok(None),
        }
    }

    fn handle_login_key(&mut self, key: event::KeyEvent) -> Option<UiAction> {
        let ctrl = key.modifiers.contains(event::KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(UiAction::Quit),
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                self.login.secret_focused = !self.login.secret_focused;
                None
            }
            KeyCode::Char('r') if ctrl => {
                self.login.role = match self.login.role {
                    Role::Admin => Role::Sales,
                    Role::Sales => Role::Admin,
                };
                None
            }
            KeyCode::Char('h') if ctrl => {
                self.help_open = true;
                None
            }
            KeyCode::Enter => Some(UiAction::Login {
                email: self.login.email.value().trim().to_string(),
                secret: self.login.secret.value().to_string(),
                role: self.login.role,
            }),
            _ => {
                if self.login.secret_focused {
                    self.login.secret.handle_event(&Event::Key(key));
                } else {
                    self.login.email.handle_event(&Event::Key(key));
                }
                None
            }
        }
    }

    fn handle_inbox_key(&mut self, state: &AppState, key: event::KeyEvent) -> Option<UiAction> {
        let ctrl = key.modifiers.contains(event::KeyModifiers::CONTROL);
        let visible = self.visible_chats(state);
        if self.chat_index >= visible.len() && !visible.is_empty() {
            self.chat_index = visible.len() - 1;
        }

        if self.searching {
            match key.code {
                KeyCode::Esc => {
                    self.searching = false;
                    self.search = Input::default();
                }
                KeyCode::Enter => self.searching = false,
                _ => {
                    self.search.handle_event(&Event::Key(key));
                    self.chat_index = 0;
                }
            }
            return None;
        }

        if ctrl {
            match key.code {
                KeyCode::Char('s') => {
                    if let Some(chat) = visible.get(self.chat_index) {
                        self.status_dialog = Some(StatusDialog {
                            chat_id: chat.id.clone(),
                            selected: STATUS_OPTIONS
                                .iter()
                                .position(|s| *s == chat.status)
                                .unwrap_or(0),
                        });
                    }
                    return None;
                }
                KeyCode::Char('r') => {
                    if let Some(chat) = visible.get(self.chat_index) {
                        let candidates: Vec<(String, String)> = state
                            .directory
                            .sales_users()
                            .iter()
                            .map(|u| (u.id.clone(), u.name.clone()))
                            .collect();
                        if candidates.is_empty() {
                            self.set_notice("No sales users to assign to");
                        } else {
                            let selected = candidates
                                .iter()
                                .position(|(id, _)| *id == chat.assigned_to)
                                .unwrap_or(0);
                            self.reassign_dialog = Some(ReassignDialog {
                                chat_id: chat.id.clone(),
                                candidates,
                                selected,
                            });
                        }
                    }
                    return None;
                }
                _ => return None,
            }
        }

        match key.code {
            KeyCode::Esc => Some(UiAction::Quit),
            KeyCode::Tab => {
                self.inbox_focus = match self.inbox_focus {
                    InboxFocus::Chats => InboxFocus::Compose,
                    InboxFocus::Compose => InboxFocus::Chats,
                };
                None
            }
            KeyCode::Up => {
                if matches!(self.inbox_focus, InboxFocus::Chats) && !visible.is_empty() {
                    self.chat_index = (self.chat_index + visible.len() - 1) % visible.len();
                }
                None
            }
            KeyCode::Down => {
                if matches!(self.inbox_focus, InboxFocus::Chats) && !visible.is_empty() {
                    self.chat_index = (self.chat_index + 1) % visible.len();
                }
                None
            }
            KeyCode::Char('/') if matches!(self.inbox_focus, InboxFocus::Chats) => {
                self.searching = true;
                None
            }
            KeyCode::Enter => match self.inbox_focus {
                InboxFocus::Chats => visible
                    .get(self.chat_index)
                    .map(|chat| UiAction::SelectChat(chat.id.clone())),
                InboxFocus::Compose => {
                    let text = self.compose.value().trim().to_string();
                    if text.is_empty() {
                        return None;
                    }
                    match state.chats.selected_chat() {
                        Some(chat) => {
                            let chat_id = chat.id.clone();
                            self.compose = Input::default();
                            Some(UiAction::SendMessage { chat_id, text })
                        }
                        None => {
                            self.set_notice("Select a chat first (Enter on the list)");
                            None
                        }
                    }
                }
            },
            _ => {
                if matches!(self.inbox_focus, InboxFocus::Compose) {
                    self.compose.handle_event(&Event::Key(key));
                }
                None
            }
        }
    }

    fn handle_team_key(&mut self, state: &AppState, code: KeyCode) -> Option<UiAction> {
        let team: Vec<(String, String, String)> = state
            .directory
            .sales_users()
            .iter()
            .map(|u| (u.id.clone(), u.name.clone(), u.email.clone()))
            .collect();
        if self.team_index >= team.len() && !team.is_empty() {
            self.team_index = team.len() - 1;
        }

        match code {
            KeyCode::Esc => Some(UiAction::Quit),
            KeyCode::Up if !team.is_empty() => {
                self.team_index = (self.team_index + team.len() - 1) % team.len();
                None
            }
            KeyCode::Down if !team.is_empty() => {
                self.team_index = (self.team_index + 1) % team.len();
                None
            }
            KeyCode::Char('a') => {
                self.user_dialog = Some(UserFormDialog {
                    editing: None,
                    name: Input::default(),
                    email: Input::default(),
                    secret: Input::default(),
                    field: 0,
                });
                None
            }
            KeyCode::Char('e') => {
                if let Some((id, name, email)) = team.get(self.team_index) {
                    self.user_dialog = Some(UserFormDialog {
                        editing: Some(id.clone()),
                        name: Input::new(name.clone()),
                        email: Input::new(email.clone()),
                        secret: Input::default(),
                        field: 0,
                    });
                }
                None
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some((id, name, _)) = team.get(self.team_index) {
                    self.confirm_dialog = Some(ConfirmDialog {
                        title: "Delete team member".to_string(),
                        body: vec![
                            format!("Remove {} from the sales team?", name),
                            "Their chats keep the assignment until reassigned.".to_string(),
                        ],
                        action: ConfirmAction::DeleteUser(id.clone()),
                    });
                }
                None
            }
            _ => None,
        }
    }

    fn handle_instances_key(&mut self, state: &AppState, code: KeyCode) -> Option<UiAction> {
        let count = state.instances.instances().len();
        if self.instance_index >= count && count > 0 {
            self.instance_index = count - 1;
        }
        let selected_id = state
            .instances
            .instances()
            .get(self.instance_index)
            .map(|i| i.id.clone());

        match code {
            KeyCode::Esc => Some(UiAction::Quit),
            KeyCode::Up if count > 0 => {
                self.instance_index = (self.instance_index + count - 1) % count;
                None
            }
            KeyCode::Down if count > 0 => {
                self.instance_index = (self.instance_index + 1) % count;
                None
            }
            KeyCode::Char('a') => {
                self.confirm_dialog = Some(ConfirmDialog {
                    title: "Create instance".to_string(),
                    body: vec![
                        "Register a new WhatsApp instance?".to_string(),
                        "The API token is generated separately (g).".to_string(),
                    ],
                    action: ConfirmAction::CreateInstance,
                });
                None
            }
            KeyCode::Char('g') => selected_id.map(UiAction::GenerateToken),
            KeyCode::Char('c') => selected_id.map(UiAction::ToggleInstance),
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(id) = selected_id {
                    self.confirm_dialog = Some(ConfirmDialog {
                        title: "Delete instance".to_string(),
                        body: vec!["Remove this WhatsApp instance?".to_string()],
                        action: ConfirmAction::DeleteInstance(id),
                    });
                }
                None
            }
            _ => None,
        }
    }

    fn handle_profile_screen_key(&mut self, state: &AppState, code: KeyCode) -> Option<UiAction> {
        match code {
            KeyCode::Esc => Some(UiAction::Quit),
            KeyCode::Char('e') => {
                if let Some(user) = state.session.current() {
                    self.profile_dialog = Some(ProfileDialog {
                        name: Input::new(user.name.clone()),
                        email: Input::new(user.email.clone()),
                        email_focused: false,
                    });
                }
                None
            }
            KeyCode::Char('s') => {
                self.secret_dialog = Some(SecretDialog {
                    current: Input::default(),
                    new_secret: Input::default(),
                    confirm: Input::default(),
                    field: 0,
                });
                None
            }
            _ => None,
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) -> Option<UiAction> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let dialog = self.confirm_dialog.take()?;
                Some(match dialog.action {
                    ConfirmAction::DeleteUser(id) => UiAction::DeleteUser(id),
                    ConfirmAction::CreateInstance => UiAction::CreateInstance,
                    ConfirmAction::DeleteInstance(id) => UiAction::DeleteInstance(id),
                })
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_dialog = None;
                None
            }
            _ => None,
        }
    }

    fn handle_status_key(&mut self, code: KeyCode) -> Option<UiAction> {
        let dialog = self.status_dialog.as_mut()?;
        match code {
            KeyCode::Esc => {
                self.status_dialog = None;
                None
            }
            KeyCode::Up => {
                dialog.selected = (dialog.selected + STATUS_OPTIONS.len() - 1) % STATUS_OPTIONS.len();
                None
            }
            KeyCode::Down => {
                dialog.selected = (dialog.selected + 1) % STATUS_OPTIONS.len();
                None
            }
            KeyCode::Char(c @ '1'..='3') => {
                let idx = (c as usize) - ('1' as usize);
                let chat_id = dialog.chat_id.clone();
                self.status_dialog = None;
                Some(UiAction::SetStatus { chat_id, status: STATUS_OPTIONS[idx] })
            }
            KeyCode::Enter => {
                let chat_id = dialog.chat_id.clone();
                let status = STATUS_OPTIONS[dialog.selected];
                self.status_dialog = None;
                Some(UiAction::SetStatus { chat_id, status })
            }
            _ => None,
        }
    }

    fn handle_reassign_key(&mut self, code: KeyCode) -> Option<UiAction> {
        let dialog = self.reassign_dialog.as_mut()?;
        match code {
            KeyCode::Esc => {
                self.reassign_dialog = None;
                None
            }
            KeyCode::Up => {
                dialog.selected =
                    (dialog.selected + dialog.candidates.len() - 1) % dialog.candidates.len();
                None
            }
            KeyCode::Down => {
                dialog.selected = (dialog.selected + 1) % dialog.candidates.len();
                None
            }
            KeyCode::Enter => {
                let chat_id = dialog.chat_id.clone();
                let user_id = dialog.candidates[dialog.selected].0.clone();
                self.reassign_dialog = None;
                Some(UiAction::Reassign { chat_id, user_id })
            }
            _ => None,
        }
    }

    fn handle_user_form_key(&mut self, key: event::KeyEvent) -> Option<UiAction> {
        let dialog = self.user_dialog.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.user_dialog = None;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                dialog.field = (dialog.field + 1) % 3;
                None
            }
            KeyCode::Up => {
                dialog.field = (dialog.field + 2) % 3;
                None
            }
            KeyCode::Enter => {
                let name = dialog.name.value().trim().to_string();
                let email = dialog.email.value().trim().to_string();
                let secret = dialog.secret.value().to_string();
                if name.is_empty() || email.is_empty() {
                    self.set_notice("Name and email are required");
                    return None;
                }
                let editing = dialog.editing.clone();
                self.user_dialog = None;
                Some(match editing {
                    Some(user_id) => UiAction::UpdateUser {
                        user_id,
                        name,
                        email,
                        secret: if secret.is_empty() { None } else { Some(secret) },
                    },
                    None => UiAction::CreateUser { name, email, secret },
                })
            }
            _ => {
                let input = match dialog.field {
                    0 => &mut dialog.name,
                    1 => &mut dialog.email,
                    _ => &mut dialog.secret,
                };
                input.handle_event(&Event::Key(key));
                None
            }
        }
    }

    fn handle_profile_key(&mut self, key: event::KeyEvent) -> Option<UiAction> {
        let dialog = self.profile_dialog.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.profile_dialog = None;
                None
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                dialog.email_focused = !dialog.email_focused;
                None
            }
            KeyCode::Enter => {
                let name = dialog.name.value().trim().to_string();
                let email = dialog.email.value().trim().to_string();
                if name.is_empty() || email.is_empty() {
                    self.set_notice("Name and email are required");
                    return None;
                }
                self.profile_dialog = None;
                Some(UiAction::UpdateProfile { name, email })
            }
            _ => {
                if dialog.email_focused {
                    dialog.email.handle_event(&Event::Key(key));
                } else {
                    dialog.name.handle_event(&Event::Key(key));
                }
                None
            }
        }
    }

    fn handle_secret_key(&mut self, key: event::KeyEvent) -> Option<UiAction> {
        let dialog = self.secret_dialog.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.secret_dialog = None;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                dialog.field = (dialog.field + 1) % 3;
                None
            }
            KeyCode::Up => {
                dialog.field = (dialog.field + 2) % 3;
                None
            }
            KeyCode::Enter => {
                let current = dialog.current.value().to_string();
                let new_secret = dialog.new_secret.value().to_string();
                let confirm = dialog.confirm.value().to_string();
                if new_secret != confirm {
                    self.set_notice("New secrets do not match");
                    return None;
                }
                self.secret_dialog = None;
                Some(UiAction::ChangeSecret { current, new_secret })
            }
            _ => {
                let input = match dialog.field {
                    0 => &mut dialog.current,
                    1 => &mut dialog.new_secret,
                    _ => &mut dialog.confirm,
                };
                input.handle_event(&Event::Key(key));
                None
            }
        }
    }

    pub fn draw<B: Backend>(&self, frame: &mut Frame<B>, state: &AppState) {
        let size = frame.size();

        if self.screen == Screen::Login {
            self.draw_login(frame, size);
            if self.help_open {
                draw_help_dialog(frame, size);
            }
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(5),    // Body
                Constraint::Length(1), // Help / notice line
            ])
            .split(size);

        self.draw_header(frame, state, chunks[0]);

        match self.screen {
            Screen::Inbox => self.draw_inbox(frame, state, chunks[1]),
            Screen::Dashboard => draw_dashboard(frame, state, chunks[1]),
            Screen::Team => self.draw_team(frame, state, chunks[1]),
            Screen::Instances => self.draw_instances(frame, state, chunks[1]),
            Screen::Profile => draw_profile(frame, state, chunks[1]),
            Screen::Login => {}
        }

        self.draw_help_line(frame, chunks[2]);

        if let Some(dialog) = &self.status_dialog {
            draw_status_dialog(frame, dialog, size);
        }
        if let Some(dialog) = &self.reassign_dialog {
            draw_reassign_dialog(frame, dialog, size);
        }
        if let Some(dialog) = &self.user_dialog {
            draw_user_form_dialog(frame, dialog, size);
        }
        if let Some(dialog) = &self.profile_dialog {
            draw_profile_dialog(frame, dialog, size);
        }
        if let Some(dialog) = &self.secret_dialog {
            draw_secret_dialog(frame, dialog, size);
        }
        if let Some(dialog) = &self.confirm_dialog {
            draw_confirm_dialog(frame, dialog, size);
        }
        if self.help_open {
            draw_help_dialog(frame, size);
        }
    }

    fn draw_header<B: Backend>(&self, frame: &mut Frame<B>, state: &AppState, area: Rect) {
        let mut spans = vec![Span::styled(
            " crmbox ",
            Style::default().fg(Color::Black).bg(Color::Green),
        )];
        for screen in [
            Screen::Inbox,
            Screen::Dashboard,
            Screen::Team,
            Screen::Instances,
            Screen::Profile,
        ] {
            let style = if screen == self.screen {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(screen.title(), style));
        }
        if let Some(user) = state.session.current() {
            spans.push(Span::styled(
                format!("  |  {} ({})", user.name, user.role.label()),
                Style::default().fg(Color::Cyan),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_help_line<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        if let Some(notice) = &self.notice {
            let line = Paragraph::new(Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Yellow),
            )));
            frame.render_widget(line, area);
            return;
        }

        let help = match self.screen {
            Screen::Inbox => {
                "ESC quit | TAB focus | Enter open/send | / search | Ctrl+S status | Ctrl+R reassign | Ctrl+H help"
            }
            Screen::Team => "ESC quit | a add | e edit | x delete | Ctrl+H help",
            Screen::Instances => "ESC quit | a add | g token | c connect/disconnect | x delete | Ctrl+H help",
            Screen::Profile => "ESC quit | e edit profile | s change secret | Ctrl+H help",
            _ => "ESC quit | Ctrl+B inbox | Ctrl+D dashboard | Ctrl+L logout | Ctrl+H help",
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(help, Style::default().fg(Color::Gray)))),
            area,
        );
    }

    fn draw_login<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let popup_width = 52.min(area.width.saturating_sub(4));
        let popup_height = 12.min(area.height.saturating_sub(2));
        let popup_x = (area.width.saturating_sub(popup_width)) / 2;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        let block = Block::default()
            .title("crmbox sign-in")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        frame.render_widget(block, popup_area);

        let inner = popup_area.inner(&Margin { vertical: 1, horizontal: 2 });
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Email
                Constraint::Length(3), // Secret
                Constraint::Length(1), // Role line
                Constraint::Length(1), // Notice
                Constraint::Min(0),
            ])
            .split(inner);

        let email_block = Block::default().title("Email").borders(Borders::ALL).border_style(
            if self.login.secret_focused {
                Style::default()
            } else {
                Style::default().fg(Color::Yellow)
            },
        );
        frame.render_widget(Paragraph::new(self.login.email.value()).block(email_block), rows[0]);

        let masked = "•".repeat(self.login.secret.value().chars().count());
        let secret_block = Block::default().title("Password").borders(Borders::ALL).border_style(
            if self.login.secret_focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            },
        );
        frame.render_widget(Paragraph::new(masked).block(secret_block), rows[1]);

        let role_line = Line::from(vec![
            Span::styled("Role: ", Style::default().fg(Color::Gray)),
            Span::styled(
                self.login.role.label(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   (Ctrl+R to switch, Enter to sign in)", Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(role_line), rows[2]);

        if let Some(notice) = &self.notice {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    notice.clone(),
                    Style::default().fg(Color::Red),
                ))),
                rows[3],
            );
        }

        let (input, row) = if self.login.secret_focused {
            (&self.login.secret, rows[1])
        } else {
            (&self.login.email, rows[0])
        };
        let cursor = if self.login.secret_focused {
            input.value().chars().count()
        } else {
            input.cursor()
        };
        frame.set_cursor(row.x + cursor as u16 + 1, row.y + 1);
    }

    fn draw_inbox<B: Backend>(&self, frame: &mut Frame<B>, state: &AppState, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(32), // Chat list
                Constraint::Percentage(68), // Conversation
            ])
            .split(area);

        self.draw_chat_list(frame, state, chunks[0]);

        let convo_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Messages
                Constraint::Length(3), // Compose box
            ])
            .split(chunks[1]);

        match state.chats.selected_chat() {
            Some(chat) => {
                let messages = state.chats.messages_for(&chat.id);
                draw_messages(frame, chat, &messages, convo_chunks[0]);
            }
            None => {
                let placeholder = Paragraph::new("Select a conversation (Enter on the list)")
                    .style(Style::default().fg(Color::Gray))
                    .block(Block::default().borders(Borders::ALL).title("Conversation"));
                frame.render_widget(placeholder, convo_chunks[0]);
            }
        }

        let compose_block = Block::default()
            .title("Message")
            .borders(Borders::ALL)
            .border_style(match self.inbox_focus {
                InboxFocus::Compose => Style::default().fg(Color::Yellow),
                InboxFocus::Chats => Style::default(),
            });
        frame.render_widget(
            Paragraph::new(self.compose.value()).block(compose_block),
            convo_chunks[1],
        );
        if matches!(self.inbox_focus, InboxFocus::Compose) {
            frame.set_cursor(
                convo_chunks[1].x + self.compose.cursor() as u16 + 1,
                convo_chunks[1].y + 1,
            );
        }
    }

    fn draw_chat_list<B: Backend>(&self, frame: &mut Frame<B>, state: &AppState, area: Rect) {
        let visible = self.visible_chats(state);
        let selected_id = state.chats.selected_chat().map(|c| c.id.clone());

        let items: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .map(|(i, chat)| {
                let marker = if i == self.chat_index { "> " } else { "  " };
                let unread = if chat.unread_count > 0 {
                    format!(" ({})", chat.unread_count)
                } else {
                    String::new()
                };
                let assignee = state
                    .directory
                    .find(&chat.assigned_to)
                    .map(|u| u.name.as_str())
                    .unwrap_or("unassigned");
                let header = format!(
                    "{}{}{} [{}] · {}",
                    marker,
                    chat.name,
                    unread,
                    chat.status.label(),
                    assignee
                );
                let snippet = format!(
                    "    {}  {}",
                    format_ts(chat.last_message_at),
                    chat.last_message
                );

                let header_style = if chat.unread_count > 0 {
                    Style::default().add_modifier(Modifier::BOLD)
                } else if Some(&chat.id) == selected_id.as_ref() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                ListItem::new(vec![
                    Line::from(Span::styled(header, header_style)),
                    Line::from(Span::styled(snippet, Style::default().fg(Color::Gray))),
                ])
            })
            .collect();

        let title = if self.search.value().is_empty() {
            "Chats".to_string()
        } else {
            format!("Chats /{}", self.search.value())
        };
        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(match self.inbox_focus {
                    InboxFocus::Chats => Style::default().fg(Color::Yellow),
                    InboxFocus::Compose => Style::default(),
                }),
        );
        frame.render_widget(list, area);
    }

    fn draw_team<B: Backend>(&self, frame: &mut Frame<B>, state: &AppState, area: Rect) {
        let chats = state.chats.chats();
        let team = state.directory.sales_users();
        let total_assigned: usize = team
            .iter()
            .map(|u| metrics::assigned_count(chats, &u.id))
            .sum();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        let summary = format!(
            "{} sales users · {} assigned chats · avg {} per user",
            team.len(),
            total_assigned,
            metrics::average_load(chats, state.directory.users())
        );
        frame.render_widget(
            Paragraph::new(summary).style(Style::default().fg(Color::Cyan)),
            chunks[0],
        );

        let items: Vec<ListItem> = team
            .iter()
            .enumerate()
            .map(|(i, user)| {
                let marker = if i == self.team_index { "> " } else { "  " };
                ListItem::new(format!(
                    "{}{} <{}> · {} chats · since {}",
                    marker,
                    user.name,
                    user.email,
                    metrics::assigned_count(chats, &user.id),
                    user.created_at.format("%Y-%m-%d"),
                ))
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .title("Sales team")
                .borders(Borders::ALL),
        );
        frame.render_widget(list, chunks[1]);
    }

    fn draw_instances<B: Backend>(&self, frame: &mut Frame<B>, state: &AppState, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        let summary = format!(
            "{} connected · {} disconnected",
            state.instances.active_count(),
            state.instances.inactive_count()
        );
        frame.render_widget(
            Paragraph::new(summary).style(Style::default().fg(Color::Cyan)),
            chunks[0],
        );

        let items: Vec<ListItem> = state
            .instances
            .instances()
            .iter()
            .enumerate()
            .map(|(i, instance)| {
                let marker = if i == self.instance_index { "> " } else { "  " };
                let token = if instance.token.is_empty() {
                    "no token (press g)".to_string()
                } else {
                    instance.token.clone()
                };
                let status_style = match instance.status {
                    InstanceStatus::Active => Style::default().fg(Color::Green),
                    InstanceStatus::Inactive => Style::default().fg(Color::Red),
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}{} ", marker, instance.instance_id)),
                    Span::styled(format!("[{}]", instance.status.label()), status_style),
                    Span::styled(format!("  {}", token), Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .title("WhatsApp instances")
                .borders(Borders::ALL),
        );
        frame.render_widget(list, chunks[1]);
    }
}

fn draw_messages<B: Backend>(f: &mut Frame<B>, chat: &Chat, messages: &[&Message], area: Rect) {
    let wrap_width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = messages
        .iter()
        .flat_map(|m| {
            let timestamp = format_ts(m.timestamp);
            let prefix = format!("[{}] {}: ", timestamp, m.sender_name);

            let status_indicator = match m.route {
                Route::Outgoing => match m.status {
                    MessageStatus::Sent => " ✓",
                    MessageStatus::Delivered => " ✓✓",
                    MessageStatus::Read => " ✓✓✓",
                },
                Route::Incoming => "",
            };

            let body = m
                .text
                .clone()
                .unwrap_or_else(|| format!("[{} message]", m.content_type.label()));
            let full_content = format!("{}{}{}", prefix, body, status_indicator);

            let wrapped_lines: Vec<String> = wrap(&full_content, wrap_width.max(10))
                .into_iter()
                .map(|l| l.into_owned())
                .collect();

            let style = match m.route {
                Route::Outgoing => match m.status {
                    MessageStatus::Read => Style::default().fg(Color::Green),
                    _ => Style::default().fg(Color::Blue),
                },
                Route::Incoming => Style::default(),
            };

            wrapped_lines
                .into_iter()
                .map(move |line| ListItem::new(Text::from(line)).style(style))
        })
        .collect();

    let title = format!("{} · {} [{}]", chat.name, chat.jid, chat.status.label());

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(items.len() - 1));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default());
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_dashboard<B: Backend>(f: &mut Frame<B>, state: &AppState, area: Rect) {
    let stats = metrics::dashboard_stats(state.chats.chats(), state.directory.users());
    let loads = metrics::agent_load(state.chats.chats(), state.directory.users());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let status_bar = |label: &str, value: usize, color: Color| {
        Line::from(vec![
            Span::raw(format!("{:<12}", label)),
            Span::styled("█".repeat(value.min(40)), Style::default().fg(color)),
            Span::raw(format!(" {}", value)),
        ])
    };

    let left = vec![
        Line::from(format!("Total chats      {}", stats.total_chats)),
        Line::from(format!("Unread messages  {}", stats.unread_total)),
        Line::from(format!("Sales team       {}", stats.sales_team_size)),
        Line::from(""),
        status_bar("Open", stats.open, Color::Green),
        status_bar("In progress", stats.in_progress, Color::Yellow),
        status_bar("Closed", stats.closed, Color::Gray),
    ];
    f.render_widget(
        Paragraph::new(left).block(Block::default().borders(Borders::ALL).title("Overview")),
        chunks[0],
    );

    let right: Vec<ListItem> = loads
        .iter()
        .map(|l| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<18}", l.name)),
                Span::styled("█".repeat(l.chats.min(40)), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {}", l.chats)),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(right).block(Block::default().borders(Borders::ALL).title("Chats per agent")),
        chunks[1],
    );
}

fn draw_profile<B: Backend>(f: &mut Frame<B>, state: &AppState, area: Rect) {
    let lines = match state.session.current() {
        Some(user) => vec![
            Line::from(format!("Name     {}", user.name)),
            Line::from(format!("Email    {}", user.email)),
            Line::from(format!("Role     {}", user.role.label())),
            Line::from(format!("Since    {}", user.created_at.format("%Y-%m-%d"))),
        ],
        None => vec![Line::from("Not signed in")],
    };
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Profile")),
        area,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

fn draw_status_dialog<B: Backend>(f: &mut Frame<B>, dialog: &StatusDialog, area: Rect) {
    let popup_area = centered_popup(area, 40, 9);
    let block = Block::default()
        .title("Change status")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(&Margin { vertical: 1, horizontal: 2 });
    let items: Vec<ListItem> = STATUS_OPTIONS
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let marker = if i == dialog.selected { "> " } else { "  " };
            ListItem::new(format!("{}{}. {}", marker, i + 1, status.label()))
        })
        .chain(std::iter::once(ListItem::new("")))
        .chain(std::iter::once(ListItem::new(
            "Enter to apply, Esc to cancel",
        )))
        .collect();
    f.render_widget(List::new(items), inner);
}

fn draw_reassign_dialog<B: Backend>(f: &mut Frame<B>, dialog: &ReassignDialog, area: Rect) {
    let popup_area = centered_popup(area, 44, (dialog.candidates.len() as u16) + 6);
    let block = Block::default()
        .title("Reassign chat")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(&Margin { vertical: 1, horizontal: 2 });
    let items: Vec<ListItem> = dialog
        .candidates
        .iter()
        .enumerate()
        .map(|(i, (_, name))| {
            let marker = if i == dialog.selected { "> " } else { "  " };
            ListItem::new(format!("{}{}", marker, name))
        })
        .chain(std::iter::once(ListItem::new("")))
        .chain(std::iter::once(ListItem::new(
            "Enter to assign, Esc to cancel",
        )))
        .collect();
    f.render_widget(List::new(items), inner);
}

fn draw_input_row<B: Backend>(f: &mut Frame<B>, title: &str, input: &Input, focused: bool, masked: bool, area: Rect) {
    let block = Block::default().title(title).borders(Borders::ALL).border_style(if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    });
    let value = if masked {
        "•".repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };
    f.render_widget(Paragraph::new(value).block(block), area);
    if focused {
        f.set_cursor(area.x + input.cursor() as u16 + 1, area.y + 1);
    }
}

fn draw_user_form_dialog<B: Backend>(f: &mut Frame<B>, dialog: &UserFormDialog, area: Rect) {
    let popup_area = centered_popup(area, 50, 13);
    let title = if dialog.editing.is_some() {
        "Edit team member"
    } else {
        "New team member"
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(&Margin { vertical: 1, horizontal: 2 });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    draw_input_row(f, "Name", &dialog.name, dialog.field == 0, false, rows[0]);
    draw_input_row(f, "Email", &dialog.email, dialog.field == 1, false, rows[1]);
    let secret_title = if dialog.editing.is_some() {
        "New password (blank keeps current)"
    } else {
        "Password (blank for default)"
    };
    draw_input_row(f, secret_title, &dialog.secret, dialog.field == 2, true, rows[2]);
}

fn draw_profile_dialog<B: Backend>(f: &mut Frame<B>, dialog: &ProfileDialog, area: Rect) {
    let popup_area = centered_popup(area, 50, 10);
    let block = Block::default()
        .title("Edit profile")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(&Margin { vertical: 1, horizontal: 2 });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    draw_input_row(f, "Name", &dialog.name, !dialog.email_focused, false, rows[0]);
    draw_input_row(f, "Email", &dialog.email, dialog.email_focused, false, rows[1]);
}

fn draw_secret_dialog<B: Backend>(f: &mut Frame<B>, dialog: &SecretDialog, area: Rect) {
    let popup_area = centered_popup(area, 50, 13);
    let block = Block::default()
        .title("Change password")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(&Margin { vertical: 1, horizontal: 2 });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    draw_input_row(f, "Current password", &dialog.current, dialog.field == 0, true, rows[0]);
    draw_input_row(f, "New password", &dialog.new_secret, dialog.field == 1, true, rows[1]);
    draw_input_row(f, "Confirm new password", &dialog.confirm, dialog.field == 2, true, rows[2]);
}

fn draw_confirm_dialog<B: Backend>(f: &mut Frame<B>, dialog: &ConfirmDialog, area: Rect) {
    let popup_area = centered_popup(area, 56, (dialog.body.len() as u16) + 6);
    let block = Block::default()
        .title(dialog.title.as_str())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(&Margin { vertical: 1, horizontal: 2 });
    let items: Vec<ListItem> = dialog
        .body
        .iter()
        .map(|s| ListItem::new(s.as_str()))
        .chain(std::iter::once(ListItem::new("")))
        .chain(std::iter::once(ListItem::new(
            "Press [Y] to confirm or [N]/[ESC] to cancel",
        )))
        .collect();
    f.render_widget(List::new(items), inner);
}

fn draw_help_dialog<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let popup_area = centered_popup(area, 70, 24);
    let block = Block::default()
        .title("Keyboard Shortcuts")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(&Margin { vertical: 1, horizontal: 2 });
    let shortcuts = vec![
        ("General", ""),
        ("ESC", "Quit"),
        ("Ctrl+B / Ctrl+D / Ctrl+P", "Inbox / Dashboard / Profile"),
        ("Ctrl+T / Ctrl+W", "Team / Instances (admin only)"),
        ("Ctrl+L", "Log out"),
        ("", ""),
        ("Inbox", ""),
        ("Tab", "Switch between chat list and message box"),
        ("↑/↓ + Enter", "Highlight and open a conversation"),
        ("/", "Filter chats by name or last message"),
        ("Ctrl+S", "Change status of the highlighted chat"),
        ("Ctrl+R", "Reassign the highlighted chat"),
        ("", ""),
        ("Team / Instances", ""),
        ("a / e / x", "Add, edit, delete the highlighted entry"),
        ("g", "Generate an API token (instances)"),
        ("c", "Connect or disconnect an instance"),
        ("", ""),
        ("Press any key to close this dialog", ""),
    ];
    let items: Vec<ListItem> = shortcuts
        .iter()
        .map(|(key, desc)| {
            if desc.is_empty() {
                if key.is_empty() {
                    ListItem::new("")
                } else {
                    ListItem::new(Text::styled(
                        key.to_string(),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ))
                }
            } else {
                let line = Line::from(vec![
                    Span::styled(format!("{:<26}", key), Style::default().fg(Color::Green)),
                    Span::raw(desc.to_string()),
                ]);
                ListItem::new(line)
            }
        })
        .collect();
    f.render_widget(List::new(items), inner);
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
