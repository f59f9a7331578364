//! Plain data row types written by output backends.

/// One agent's state at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:       u32,
    pub unit_id:        u32,
    pub owner:          u16,
    pub tick:           u64,
    pub x:              f32,
    pub z:              f32,
    /// Current / max health; `-1` for units without health.
    pub health:         f32,
    /// Empty while idle.
    pub current_action: String,
    pub queued_actions: u32,
}

/// Counters for one scene tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:        u64,
    pub elapsed_ms:  u64,
    pub updated:     u64,
    pub completed:   u64,
    pub evaluated:   u64,
    pub switched:    u64,
    pub reaped:      u64,
    pub live_agents: u64,
}
