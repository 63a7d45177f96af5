use anyhow::Result;
use clap::Parser;
use log::{info, warn, LevelFilter};
use std::path::PathBuf;

mod ui;
mod utils;

use crmbox::directory::{Directory, DirectoryError};
use crmbox::instances::InstanceStore;
use crmbox::models::{ContentType, Role};
use crmbox::seed;
use crmbox::session::{default_state_dir, set_state_dir_override, SessionStore};
use crmbox::store::ConversationStore;

use crate::ui::{AppState, Screen, Ui, UiAction};

/// Command line arguments for crmbox
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "crmbox: a terminal CRM inbox for WhatsApp customer conversations.",
    long_about = "crmbox is a terminal workspace for managing WhatsApp-style customer\n\
    conversations: a chat inbox with assignment and status tracking, a sales-team\n\
    screen, a WhatsApp instance manager, and a metrics dashboard.\n\n\
    Optional parameters:\n\
    --state-dir <PATH>     Override the directory for the identity slot and log file\n\
    Use -h or --help to see all options."
)]
struct Args {
    /// Directory for the persisted identity and the log file
    #[arg(long, value_name = "PATH", help = "Override the directory for durable state")]
    state_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_file_path = match &args.state_dir {
        Some(dir) => {
            if !dir.exists() {
                if let Err(e) = std::fs::create_dir_all(dir) {
                    eprintln!(
                        "Warning: Failed to create state directory {}: {}. Log file might not be created.",
                        dir.display(),
                        e
                    );
                    PathBuf::from("crmbox.log")
                } else {
                    dir.join("crmbox.log")
                }
            } else {
                dir.join("crmbox.log")
            }
        }
        None => PathBuf::from("crmbox.log"),
    };

    utils::setup_logging(log_file_path.to_str(), LevelFilter::Debug)?;
    info!("crmbox starting up");
    info!("Logging to file: {}", log_file_path.display());

    if let Some(dir) = &args.state_dir {
        set_state_dir_override(dir.clone());
        info!("State directory overridden to: {}", dir.display());
    }

    let state_dir = default_state_dir()?;
    let mut session = SessionStore::new(&state_dir);
    session.restore_on_start();

    let mut state = AppState {
        directory: Directory::new(seed::seed_users()),
        chats: ConversationStore::new(seed::seed_chats(), seed::seed_messages()),
        instances: InstanceStore::new(seed::seed_instances()),
        session,
    };

    let start = if state.session.is_authenticated() {
        Screen::Inbox
    } else {
        Screen::Login
    };

    let mut terminal = ui::setup_terminal()?;
    let mut app = Ui::new(start);

    let result = run(&mut terminal, &mut app, &mut state);

    ui::restore_terminal(terminal)?;
    info!("crmbox shut down");
    result
}

fn run(
    terminal: &mut ui::Terminal<ui::CrosstermBackend<std::io::Stdout>>,
    app: &mut Ui,
    state: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f, state))?;
        if let Some(action) = app.handle_input(state)? {
            if apply_action(state, app, action) {
                return Ok(());
            }
        }
    }
}

/// Applies one UI action to the stores. Returns true when the app should
/// exit. Store-level rejections (stale ids, bad secrets) become notices.
fn apply_action(state: &mut AppState, app: &mut Ui, action: UiAction) -> bool {
    match action {
        UiAction::Quit => return true,

        UiAction::Login { email, secret, role } => {
            if state
                .session
                .login(state.directory.users(), &email, &secret, Some(role))
            {
                app.show_screen(Screen::Inbox);
            } else {
                app.set_notice(format!(
                    "Invalid credentials for {} role. Try: admin@whatsappcrm.com / admin123",
                    role.label()
                ));
            }
        }

        UiAction::Logout => {
            state.session.logout();
            app.show_screen(Screen::Login);
        }

        UiAction::SelectChat(chat_id) => {
            if let Err(e) = state.chats.select_chat(&chat_id) {
                warn!("select_chat failed: {}", e);
            }
        }

        UiAction::SendMessage { chat_id, text } => {
            if let Err(e) = state.chats.send_message(&chat_id, &text, ContentType::Text) {
                warn!("send_message failed: {}", e);
                app.set_notice("That conversation no longer exists");
            }
        }

        UiAction::SetStatus { chat_id, status } => match state.chats.update_status(&chat_id, status) {
            Ok(()) => app.set_notice(format!("Status changed to {}", status.label())),
            Err(e) => {
                warn!("update_status failed: {}", e);
                app.set_notice("That conversation no longer exists");
            }
        },

        UiAction::Reassign { chat_id, user_id } => match state.chats.reassign(&chat_id, &user_id) {
            Ok(()) => app.set_notice("Chat reassigned"),
            Err(e) => {
                warn!("reassign failed: {}", e);
                app.set_notice("That conversation no longer exists");
            }
        },

        UiAction::CreateUser { name, email, secret } => {
            state.directory.create_user(&name, &email, Role::Sales, &secret);
            app.set_notice("New sales user has been added");
        }

        UiAction::UpdateUser { user_id, name, email, secret } => {
            match state
                .directory
                .update_user(&user_id, &name, &email, Role::Sales, secret.as_deref())
            {
                Ok(()) => {
                    // Keep the persisted identity in step if the logged-in
                    // user was the one edited.
                    let is_current = state
                        .session
                        .current()
                        .map_or(false, |u| u.id == user_id);
                    if is_current {
                        if let Some(user) = state.directory.find(&user_id) {
                            let user = user.clone();
                            state.session.refresh(&user);
                        }
                    }
                    app.set_notice("Sales user has been updated");
                }
                Err(e) => {
                    warn!("update_user failed: {}", e);
                    app.set_notice("That user no longer exists");
                }
            }
        }

        UiAction::DeleteUser(user_id) => match state.directory.delete_user(&user_id) {
            Ok(()) => app.set_notice("Sales user has been removed"),
            Err(e) => {
                warn!("delete_user failed: {}", e);
                app.set_notice("That user no longer exists");
            }
        },

        UiAction::CreateInstance => {
            let admin_id = state
                .session
                .current()
                .map(|u| u.id.clone())
                .unwrap_or_default();
            let instance = state.instances.create(&admin_id);
            app.set_notice(format!("Instance {} created", instance.instance_id));
        }

        UiAction::GenerateToken(id) => match state.instances.generate_token(&id) {
            Ok(_) => app.set_notice("New API token has been generated"),
            Err(e) => {
                warn!("generate_token failed: {}", e);
                app.set_notice("That instance no longer exists");
            }
        },

        UiAction::ToggleInstance(id) => match state.instances.toggle_status(&id) {
            Ok(status) => app.set_notice(format!("Instance is now {}", status.label())),
            Err(e) => {
                warn!("toggle_status failed: {}", e);
                app.set_notice("That instance no longer exists");
            }
        },

        UiAction::DeleteInstance(id) => match state.instances.delete(&id) {
            Ok(()) => app.set_notice("WhatsApp instance has been removed"),
            Err(e) => {
                warn!("delete_instance failed: {}", e);
                app.set_notice("That instance no longer exists");
            }
        },

        UiAction::UpdateProfile { name, email } => {
            let user_id = state.session.current().map(|u| u.id.clone());
            match user_id {
                Some(user_id) => match state.directory.update_profile(&user_id, &name, &email) {
                    Ok(user) => {
                        let user = user.clone();
                        state.session.refresh(&user);
                        app.set_notice("Your profile has been updated");
                    }
                    Err(e) => {
                        warn!("update_profile failed: {}", e);
                        app.set_notice("Your account no longer exists");
                    }
                },
                None => app.set_notice("Not signed in"),
            }
        }

        UiAction::ChangeSecret { current, new_secret } => {
            let user_id = state.session.current().map(|u| u.id.clone());
            match user_id {
                Some(user_id) => {
                    match state.directory.change_secret(&user_id, &current, &new_secret) {
                        Ok(user) => {
                            let user = user.clone();
                            state.session.refresh(&user);
                            app.set_notice("Your password has been updated");
                        }
                        Err(DirectoryError::SecretMismatch) => {
                            app.set_notice("Current password is incorrect")
                        }
                        Err(DirectoryError::EmptySecret) => {
                            app.set_notice("New password must not be empty")
                        }
                        Err(e) => {
                            warn!("change_secret failed: {}", e);
                            app.set_notice("Your account no longer exists");
                        }
                    }
                }
                None => app.set_notice("Not signed in"),
            }
        }
    }
    false
}
