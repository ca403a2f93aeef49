// src/batch/ch19.rs
use chrono::{TimeZone, Utc};

use super::{format_timestamp, LineAdvance, ThemeNote, UpdateBatch};
use crate::entity::LineStatus::{Active, Climax, Resolving};
use crate::entity::{StoryUnit, UnitStatus, UnitType};
use crate::error::{Result, StorylineError};

const UNIT_ID: &str = "unit-ch19";
const UNIT_NUMBER: u32 = 19;

/// The edits made once chapter 19, "La convergence", was written.
pub fn chapter_19() -> Result<UpdateBatch> {
    let at = Utc
        .with_ymd_and_hms(2026, 2, 19, 6, 0, 0)
        .single()
        .ok_or_else(|| StorylineError::InvalidTimestamp("2026-02-19 06:00:00".to_string()))?;
    let timestamp = format_timestamp(at);

    let mut unit = StoryUnit::new(
        UNIT_ID.to_string(),
        UNIT_NUMBER,
        "La convergence".to_string(),
        &timestamp,
    );
    unit.unit_type = UnitType::Chapter;
    unit.status = UnitStatus::Completed;
    unit.content = "[See chapter text file]".to_string();
    unit.summary = "Soren franchit le mur ouvert. Reseau annonce delegation. Flagor retourne \
                    aux vestiges. Kira atterrit au nord. Convergence totale."
        .to_string();

    let lines = vec![
        LineAdvance::new(
            "line-flagor-ascension",
            (0.9, 0.95),
            (Active, Active),
            "Retourne dans les vestiges. Choix actif. 'Huit heures. C'est assez.'",
        ),
        LineAdvance::new(
            "line-guerre",
            (0.8, 0.85),
            (Active, Active),
            "Delegation en approche. Kira atterrit au nord. Convergence physique.",
        ),
        LineAdvance::new(
            "line-passe-flagor",
            (0.75, 0.8),
            (Climax, Climax),
            "Syra moteur du retour. Le passe dicte le mouvement.",
        ),
        LineAdvance::new(
            "line-astre-eteint",
            (0.65, 0.7),
            (Active, Active),
            "Convergence totale : Soren, Flagor, delegation Biomen sur le meme sol.",
        ),
        LineAdvance::new(
            "line-biomen",
            (0.85, 0.9),
            (Active, Active),
            "Kira dans la delegation. Instructions d'Helena. Atterrit au nord.",
        ),
        LineAdvance::new(
            "line-bamboule",
            (0.8, 0.85),
            (Active, Active),
            "Soren franchit l'ouverture. Pierre froide. Reseau annonce la delegation.",
        ),
        LineAdvance::new(
            "line-oligarchie",
            (0.75, 0.8),
            (Active, Active),
            "Helena agit via delegation. Instructions verbales, pas ecrites.",
        ),
        LineAdvance::new(
            "line-message-ils-savent",
            (0.35, 0.35),
            (Active, Active),
            "Reseau envoie : delegation en route. Heures, pas jours.",
        ),
        LineAdvance::new(
            "line-vestiges-astre",
            (0.65, 0.7),
            (Resolving, Resolving),
            "Vestiges retires. Mur ouvert. Lumiere faiblit. Aux humains de choisir.",
        ),
    ];

    let promises = [
        "promise-kira-verdict",
        "promise-helena-plan",
        "promise-reseau-anonyme",
        "promise-syra-identity",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let themes = vec![
        ThemeNote::new(
            "tq-pouvoir-performance",
            "Flagor : pouvoir comme retour. Kira : 'Au nord' - premier acte d'autorite.",
        ),
        ThemeNote::new(
            "tq-dignite-systeme",
            "Soren franchit le mur. Dignite comme occupation d'un espace non destine. \
             Kira : dignite retrouvee.",
        ),
        ThemeNote::new(
            "tq-guerre-instrumentalisee",
            "Helena envoie sans protocole ecrit. Kira atterrit pres des vestiges - \
             mission echappe au plan.",
        ),
    ];

    Ok(UpdateBatch::new(unit, lines, promises, themes))
}
