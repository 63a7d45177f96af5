use crate::models::{Chat, ChatStatus, Role, User};

/// Headline numbers for the dashboard screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_chats: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
    pub unread_total: u32,
    pub sales_team_size: usize,
}

/// Per-agent conversation load, sales users only.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentLoad {
    pub user_id: String,
    pub name: String,
    pub chats: usize,
}

pub fn assigned_count(chats: &[Chat], user_id: &str) -> usize {
    chats.iter().filter(|c| c.assigned_to == user_id).count()
}

pub fn dashboard_stats(chats: &[Chat], users: &[User]) -> DashboardStats {
    let count = |s: ChatStatus| chats.iter().filter(|c| c.status == s).count();
    DashboardStats {
        total_chats: chats.len(),
        open: count(ChatStatus::Open),
        in_progress: count(ChatStatus::InProgress),
        closed: count(ChatStatus::Closed),
        unread_total: chats.iter().map(|c| c.unread_count).sum(),
        sales_team_size: users.iter().filter(|u| u.role == Role::Sales).count(),
    }
}

pub fn agent_load(chats: &[Chat], users: &[User]) -> Vec<AgentLoad> {
    users
        .iter()
        .filter(|u| u.role == Role::Sales)
        .map(|u| AgentLoad {
            user_id: u.id.clone(),
            name: u.name.clone(),
            chats: assigned_count(chats, &u.id),
        })
        .collect()
}

/// Mean assigned-chat count per sales user, rounded to the nearest whole
/// conversation. Zero when the team is empty.
pub fn average_load(chats: &[Chat], users: &[User]) -> usize {
    let loads = agent_load(chats, users);
    if loads.is_empty() {
        return 0;
    }
    let total: usize = loads.iter().map(|l| l.chats).sum();
    ((total as f64) / (loads.len() as f64)).round() as usize
}
