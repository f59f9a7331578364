//! CSV action catalog loader.
//!
//! # CSV format
//!
//! One row per action template.  Only `name` and `kind` are required; any
//! empty column keeps the kind's default.
//!
//! ```csv
//! name,kind,icon,description,smart,stopping_distance,max_follow_distance,repoll_secs,damage,range,delay_secs,radius,structure,indicator,cost_kind,cost_amount,build_secs,amount,complete_when_empty,command_weight,autonomous_weight,layers
//! move,move_to_point,move,Move to a point,true,0.5,,,,,,,,,,,,,,,,0|1
//! attack,attack,sword,Attack an enemy,true,1.5,40,0.5,12,2.0,1.2,10,,,,,,,,1.0,0.8,
//! build_barracks,build,hammer,Build barracks,false,1.0,,,,,,,barracks,barracks_ghost,0,150,8,,,,,0
//! gather,collect,basket,Gather,true,1.0,,,,2.0,1.0,15,,,,,,10,true,1.0,0.4,
//! ```
//!
//! **`kind`** selects the action type:
//!
//! | Value            | Action           | Uses                                         |
//! |------------------|------------------|----------------------------------------------|
//! | `move_to_point`  | `MoveToPoint`    | `stopping_distance`, `layers`                |
//! | `move_to_target` | `MoveToTarget`   | `stopping_distance`, `max_follow_distance`, `repoll_secs` |
//! | `patrol`         | `Patrol`         | `stopping_distance`, `layers`                |
//! | `attack`         | `DirectedAttack` | follow columns, `damage`, `range`, `delay_secs`, `radius` (aggro) |
//! | `build`          | `CreateBuilding` | `stopping_distance`, `layers`, `structure`, `indicator`, `cost_*`, `build_secs` |
//! | `collect`        | `CollectResource`| follow columns, `amount`, `range`, `delay_secs`, `radius` (search), `complete_when_empty` |
//!
//! **`layers`** is `all`, `none`, or a `|`-separated list of layer indices.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rts_core::{LayerMask, ResourceKind};
use rts_world::Cost;

use crate::{
    Action, ActionError, ActionInfo, ActionLibrary, ActionResult, CollectResource,
    CollectResourceParams, CreateBuilding, CreateBuildingParams, DirectedAttack,
    DirectedAttackParams, MoveToPoint, MoveToPointParams, MoveToTarget, MoveToTargetParams, Patrol,
    PatrolParams, UtilityWeights,
};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum ActionKind {
    MoveToPoint,
    MoveToTarget,
    Patrol,
    Attack,
    Build,
    Collect,
}

#[derive(Deserialize, Debug)]
struct CatalogRecord {
    name:                String,
    kind:                ActionKind,
    #[serde(default)]
    icon:                String,
    #[serde(default)]
    description:         String,
    #[serde(default)]
    smart:               Option<bool>,
    #[serde(default)]
    stopping_distance:   Option<f32>,
    #[serde(default)]
    max_follow_distance: Option<f32>,
    #[serde(default)]
    repoll_secs:         Option<f32>,
    #[serde(default)]
    damage:              Option<u32>,
    #[serde(default)]
    range:               Option<f32>,
    #[serde(default)]
    delay_secs:          Option<f32>,
    #[serde(default)]
    radius:              Option<f32>,
    #[serde(default)]
    structure:           Option<String>,
    #[serde(default)]
    indicator:           Option<String>,
    #[serde(default)]
    cost_kind:           Option<u16>,
    #[serde(default)]
    cost_amount:         Option<u32>,
    #[serde(default)]
    build_secs:          Option<f32>,
    #[serde(default)]
    amount:              Option<u32>,
    #[serde(default)]
    complete_when_empty: Option<bool>,
    #[serde(default)]
    command_weight:      Option<f32>,
    #[serde(default)]
    autonomous_weight:   Option<f32>,
    #[serde(default)]
    layers:              Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load action templates from a CSV file.
pub fn load_catalog_csv(path: &Path) -> ActionResult<ActionLibrary> {
    let file = std::fs::File::open(path)?;
    load_catalog_reader(file)
}

/// Like [`load_catalog_csv`] but accepts any `Read` source.
pub fn load_catalog_reader<R: Read>(reader: R) -> ActionResult<ActionLibrary> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut library = ActionLibrary::new();

    for (line, result) in csv_reader.deserialize::<CatalogRecord>().enumerate() {
        let row = result.map_err(|e| ActionError::Catalog(e.to_string()))?;
        let template = build_template(row)
            .map_err(|e| ActionError::Catalog(format!("row {}: {e}", line + 1)))?;
        library.register(template)?;
    }

    tracing::debug!(templates = library.len(), "loaded action catalog");
    Ok(library)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_template(row: CatalogRecord) -> ActionResult<Box<dyn Action>> {
    if row.name.trim().is_empty() {
        return Err(ActionError::Catalog("empty action name".into()));
    }
    let layers = match row.layers.as_deref() {
        Some(s) => s.parse::<LayerMask>()?,
        None => LayerMask::ALL,
    };

    let mut info = ActionInfo::new(row.name.trim())
        .with_icon(&row.icon)
        .with_description(&row.description);
    if let Some(smart) = row.smart {
        info = info.smart(smart);
    }

    let weights = |default: UtilityWeights| UtilityWeights {
        command:    row.command_weight.unwrap_or(default.command),
        autonomous: row.autonomous_weight.unwrap_or(default.autonomous),
    };
    let follow = |default: MoveToTargetParams| MoveToTargetParams {
        repoll_secs:         row.repoll_secs.unwrap_or(default.repoll_secs),
        max_follow_distance: row.max_follow_distance.unwrap_or(default.max_follow_distance),
        stopping_distance:   row.stopping_distance.unwrap_or(default.stopping_distance),
        weights:             weights(default.weights),
    };

    let template: Box<dyn Action> = match row.kind {
        ActionKind::MoveToPoint => {
            let d = MoveToPointParams::default();
            Box::new(MoveToPoint::new(info, MoveToPointParams {
                stopping_distance: row.stopping_distance.unwrap_or(d.stopping_distance),
                allowed_layers:    layers,
                weights:           weights(d.weights),
            }))
        }
        ActionKind::MoveToTarget => {
            Box::new(MoveToTarget::new(info, follow(MoveToTargetParams::default())))
        }
        ActionKind::Patrol => {
            let d = PatrolParams::default();
            Box::new(Patrol::new(info, PatrolParams {
                stopping_distance: row.stopping_distance.unwrap_or(d.stopping_distance),
                allowed_layers:    layers,
                weights:           weights(d.weights),
            }))
        }
        ActionKind::Attack => {
            let d = DirectedAttackParams::default();
            Box::new(DirectedAttack::new(info, DirectedAttackParams {
                damage:            row.damage.unwrap_or(d.damage),
                attack_range:      row.range.unwrap_or(d.attack_range),
                attack_delay_secs: row.delay_secs.unwrap_or(d.attack_delay_secs),
                aggro_radius:      row.radius.unwrap_or(d.aggro_radius),
                follow:            follow(d.follow),
                weights:           weights(d.weights),
            }))
        }
        ActionKind::Build => {
            let structure = row
                .structure
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ActionError::Catalog("build action needs a structure prefab".into()))?;
            let cost = match (row.cost_kind, row.cost_amount) {
                (Some(kind), Some(amount)) => Cost::single(ResourceKind(kind), amount),
                (None, None) => Cost::new(),
                _ => {
                    return Err(ActionError::Catalog(
                        "cost_kind and cost_amount must be given together".into(),
                    ));
                }
            };
            let d = CreateBuildingParams::new(structure, cost);
            Box::new(CreateBuilding::new(info, CreateBuildingParams {
                indicator:         row.indicator.clone().filter(|s| !s.trim().is_empty()),
                build_secs:        row.build_secs.unwrap_or(d.build_secs),
                stopping_distance: row.stopping_distance.unwrap_or(d.stopping_distance),
                allowed_layers:    layers,
                weights:           weights(d.weights),
                ..d
            }))
        }
        ActionKind::Collect => {
            let d = CollectResourceParams::default();
            Box::new(CollectResource::new(info, CollectResourceParams {
                amount:              row.amount.unwrap_or(d.amount),
                collect_secs:        row.delay_secs.unwrap_or(d.collect_secs),
                collect_range:       row.range.unwrap_or(d.collect_range),
                search_radius:       row.radius.unwrap_or(d.search_radius),
                complete_when_empty: row.complete_when_empty.unwrap_or(d.complete_when_empty),
                follow:              follow(d.follow),
                weights:             weights(d.weights),
            }))
        }
    };
    Ok(template)
}
