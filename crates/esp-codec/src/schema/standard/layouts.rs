//! Packed layouts and enumerations of the built-in subrecords.

use crate::model::{field, Compat, EnumTable, FieldKind, Layout, ScalarKind};

const U8: FieldKind = FieldKind::Scalar(ScalarKind::U8);
const I8: FieldKind = FieldKind::Scalar(ScalarKind::I8);
const U16: FieldKind = FieldKind::Scalar(ScalarKind::U16);
const I16: FieldKind = FieldKind::Scalar(ScalarKind::I16);
const U32: FieldKind = FieldKind::Scalar(ScalarKind::U32);
const I32: FieldKind = FieldKind::Scalar(ScalarKind::I32);
const F32: FieldKind = FieldKind::Scalar(ScalarKind::F32);

// =============================================================================
// Common
// =============================================================================

/// `OBND`: object bounds, two corners of a box.
pub const OBJECT_BOUNDS: Layout = Layout::new(
    "ObjectBounds",
    &[
        field("x1", I16),
        field("y1", I16),
        field("z1", I16),
        field("x2", I16),
        field("y2", I16),
        field("z2", I16),
    ],
);

// =============================================================================
// Destruction
// =============================================================================

/// `DEST`: destruction header.
pub const DESTRUCTION_HEADER: Layout = Layout::new(
    "DestructionHeader",
    &[
        field("health", I32),
        field("stage_count", U8),
        field("flags", U8),
        field("unused", FieldKind::Bytes(2)),
    ],
);

/// `DSTD`: one destruction stage.
pub const DESTRUCTION_STAGE: Layout = Layout::new(
    "DestructionStage",
    &[
        field("health_percent", U8),
        field("index", U8),
        field("damage_stage", U8),
        field("flags", U8),
        field("self_damage_per_second", I32),
        field("explosion", FieldKind::FormId),
        field("debris", FieldKind::FormId),
        field("debris_count", I32),
    ],
);

/// `DSTF`: end of a destruction stage.
pub const STAGE_END: Layout = Layout::new("StageEnd", &[]);

// =============================================================================
// Items
// =============================================================================

/// `CNTO`: one inventory entry.
pub const CONTAINER_ITEM: Layout = Layout::new(
    "ContainerItem",
    &[field("item", FieldKind::FormId), field("count", I32)],
);

/// `COED`: extra data for the preceding `CNTO`.
///
/// `global_or_rank` is either a global variable reference or a little-endian
/// rank, depending on the owner, so it is kept as bytes.
pub const EXTRA_DATA: Layout = Layout::new(
    "ExtraData",
    &[
        field("owner", FieldKind::FormId),
        field("global_or_rank", FieldKind::Bytes(4)),
        field("condition", F32),
    ],
);

// =============================================================================
// Scripts
// =============================================================================

/// `SCHR`: basic script data.
pub const SCRIPT_HEADER: Layout = Layout::new(
    "ScriptHeader",
    &[
        field("unused", FieldKind::Bytes(4)),
        field("ref_count", U32),
        field("compiled_size", U32),
        field("variable_count", U32),
        field("script_type", U16),
        field("flags", U16),
    ],
);

/// `SLSD`: local variable data.
pub const LOCAL_VARIABLE: Layout = Layout::new(
    "LocalVariable",
    &[
        field("index", U32),
        field("unused", FieldKind::Bytes(12)),
        field("flags", U8),
        field("unused_tail", FieldKind::Bytes(7)),
    ],
);

// =============================================================================
// ARMA
// =============================================================================

/// `ARMA` `DATA`.
pub const ARMOR_ADDON_DATA: Layout = Layout::new(
    "ArmorAddonData",
    &[
        field("value", U32),
        field("max_condition", U32),
        field("weight", F32),
    ],
);

/// `ARMA` `DNAM` as written by New Vegas. The armor rating is stored x100.
pub const ARMOR_RATING: Layout = Layout::new(
    "ArmorRating",
    &[
        field("ar", I16),
        field("flags", U16),
        field("unknown", FieldKind::Bytes(8)),
    ],
);

/// `ARMA` `DNAM` as written by Fallout 3.
pub const ARMOR_RATING_FO3: Layout = Layout::new(
    "ArmorRatingFo3",
    &[field("ar", I16), field("flags", U16)],
);

pub const ARMOR_RATING_COMPAT: Compat = Compat::new(&ARMOR_RATING, &[&ARMOR_RATING_FO3]);

/// `BMDT`: biped data.
pub const BIPED_DATA: Layout = Layout::new(
    "BipedData",
    &[
        field("biped_flags", U32),
        field("general_flags", U8),
        field("unused", FieldKind::Bytes(3)),
    ],
);

// =============================================================================
// CONT / KEYM
// =============================================================================

/// `CONT` `DATA`.
pub const CONTAINER_DATA: Layout = Layout::new(
    "ContainerData",
    &[field("flags", U8), field("weight", F32)],
);

/// `KEYM` `DATA`.
pub const KEY_DATA: Layout = Layout::new("KeyData", &[field("value", I32), field("weight", F32)]);

// =============================================================================
// CREA
// =============================================================================

pub const CREATURE_TYPE: EnumTable = EnumTable::new(
    "CreatureType",
    ScalarKind::U8,
    &[
        (0, "Animal"),
        (1, "MutatedAnimal"),
        (2, "MutatedInsect"),
        (3, "Abomination"),
        (4, "SuperMutant"),
        (5, "FeralGhoul"),
        (6, "Robot"),
        (7, "Giant"),
    ],
);

/// `CSDT`: which sound slot the following `CSDI`/`CSDC` pairs fill.
pub const SOUND_TYPE: EnumTable = EnumTable::new(
    "SoundType",
    ScalarKind::U32,
    &[
        (0, "LeftFoot"),
        (1, "RightFoot"),
        (2, "LeftBackFoot"),
        (3, "RightBackFoot"),
        (4, "Idle"),
        (5, "Aware"),
        (6, "Attack"),
        (7, "Hit"),
        (8, "Death"),
        (9, "Weapon"),
        (10, "MovementLoop"),
        (11, "ConsciousLoop"),
        (12, "Auxiliary1"),
        (13, "Auxiliary2"),
        (14, "Auxiliary3"),
        (15, "Auxiliary4"),
        (16, "Auxiliary5"),
        (17, "Auxiliary6"),
        (18, "Auxiliary7"),
        (19, "Auxiliary8"),
        (20, "Jump"),
        (21, "PlayRandomOrLoop"),
    ],
);

pub const AGGRESSION: EnumTable = EnumTable::new(
    "Aggression",
    ScalarKind::U8,
    &[
        (0, "Unaggressive"),
        (1, "Aggressive"),
        (2, "VeryAggressive"),
        (3, "Frenzied"),
    ],
);

pub const CONFIDENCE: EnumTable = EnumTable::new(
    "Confidence",
    ScalarKind::U8,
    &[
        (0, "Cowardly"),
        (1, "Cautious"),
        (2, "Average"),
        (3, "Brave"),
        (4, "Foolhardy"),
    ],
);

pub const MOOD: EnumTable = EnumTable::new(
    "Mood",
    ScalarKind::U8,
    &[
        (0, "Neutral"),
        (1, "Afraid"),
        (2, "Annoyed"),
        (3, "Cocky"),
        (4, "Drugged"),
        (5, "Pleasant"),
        (6, "Angry"),
        (7, "Sad"),
    ],
);

pub const ASSISTANCE: EnumTable = EnumTable::new(
    "Assistance",
    ScalarKind::I8,
    &[(0, "Nobody"), (1, "Allies"), (2, "FriendsAllies")],
);

pub const SKILL: EnumTable = EnumTable::new(
    "Skill",
    ScalarKind::I8,
    &[
        (-1, "None"),
        (0, "Barter"),
        (1, "BigGuns"),
        (2, "EnergyWeapons"),
        (3, "Explosives"),
        (4, "Lockpick"),
        (5, "Medicine"),
        (6, "MeleeWeapons"),
        (7, "Repair"),
        (8, "Science"),
        (9, "SmallGuns"),
        (10, "Sneak"),
        (11, "Speech"),
        (12, "Throwing"),
        (13, "Unarmed"),
    ],
);

/// `ACBS`: actor configuration.
pub const ACTOR_CONFIG: Layout = Layout::new(
    "ActorConfig",
    &[
        field("flags", U32),
        field("fatigue", U16),
        field("barter_gold", U16),
        field("level", I16),
        field("calc_min", U16),
        field("calc_max", U16),
        field("speed_multiplier", U16),
        field("karma", F32),
        field("disposition_base", I16),
        field("template_flags", U16),
    ],
);

/// `AIDT`: AI data.
pub const AI_DATA: Layout = Layout::new(
    "AiData",
    &[
        field("aggression", FieldKind::Enum(&AGGRESSION)),
        field("confidence", FieldKind::Enum(&CONFIDENCE)),
        field("energy_level", U8),
        field("responsibility", U8),
        field("mood", FieldKind::Enum(&MOOD)),
        field("unused", FieldKind::Bytes(3)),
        field("services", U32),
        field("teaches", FieldKind::Enum(&SKILL)),
        field("max_training_level", U8),
        field("assistance", FieldKind::Enum(&ASSISTANCE)),
        field("aggro_radius_flags", U8),
        field("aggro_radius", I32),
    ],
);

/// `CREA` `DATA`.
pub const CREATURE_DATA: Layout = Layout::new(
    "CreatureData",
    &[
        field("creature_type", FieldKind::Enum(&CREATURE_TYPE)),
        field("combat_skill", U8),
        field("magic_skill", U8),
        field("stealth_skill", U8),
        field("health", I16),
        field("unused", FieldKind::Bytes(2)),
        field("damage", I16),
        field("strength", U8),
        field("perception", U8),
        field("endurance", U8),
        field("charisma", U8),
        field("intelligence", U8),
        field("agility", U8),
        field("luck", U8),
    ],
);

/// `CREA` `SNAM`: faction membership.
pub const FACTION: Layout = Layout::new(
    "Faction",
    &[
        field("faction", FieldKind::FormId),
        field("rank", U8),
        field("unused", FieldKind::Bytes(3)),
    ],
);
