//! Animation motion descriptors
//!
//! A motion is one row of an actor's sprite sheet: which row, how many frames
//! it has, and whether it loops or freezes on its last frame.

use serde::{Deserialize, Serialize};

/// Named animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionKind {
    Standing,
    Airborne,
    Running,
    Attacking,
}

/// One sprite-sheet row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    /// Sprite-sheet row
    pub index: u32,
    /// Frames in the row (at least 1)
    pub num_sprites: u32,
    /// Wrap to frame 0 after the last frame
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Motion {
    pub const fn new(index: u32, num_sprites: u32, looping: bool) -> Self {
        Self {
            index,
            num_sprites,
            looping,
        }
    }

    #[inline]
    pub fn last_frame(&self) -> u32 {
        self.num_sprites.saturating_sub(1)
    }
}

/// Per-actor mapping from motion kind to sprite row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionTable {
    pub standing: Motion,
    pub airborne: Motion,
    pub running: Motion,
    pub attacking: Motion,
}

impl MotionTable {
    /// Hero sheet: four distinct rows
    pub const HERO: Self = Self {
        standing: Motion::new(0, 5, true),
        airborne: Motion::new(1, 5, false),
        running: Motion::new(2, 6, true),
        attacking: Motion::new(3, 5, false),
    };

    /// Hostile sheet: airborne and running share row 0, and hostiles never
    /// stand still so standing reuses the running row too
    pub const HOSTILE: Self = Self {
        standing: Motion::new(0, 6, true),
        airborne: Motion::new(0, 4, false),
        running: Motion::new(0, 6, true),
        attacking: Motion::new(1, 4, false),
    };

    pub fn get(&self, kind: MotionKind) -> &Motion {
        match kind {
            MotionKind::Standing => &self.standing,
            MotionKind::Airborne => &self.airborne,
            MotionKind::Running => &self.running,
            MotionKind::Attacking => &self.attacking,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MotionKind, &Motion)> {
        [
            (MotionKind::Standing, &self.standing),
            (MotionKind::Airborne, &self.airborne),
            (MotionKind::Running, &self.running),
            (MotionKind::Attacking, &self.attacking),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_kind() {
        let table = MotionTable::HERO;
        assert_eq!(table.get(MotionKind::Running).num_sprites, 6);
        assert_eq!(table.get(MotionKind::Attacking).index, 3);
        assert!(!table.get(MotionKind::Airborne).looping);
    }

    #[test]
    fn test_last_frame() {
        assert_eq!(Motion::new(0, 5, true).last_frame(), 4);
        assert_eq!(Motion::new(0, 1, true).last_frame(), 0);
    }

    #[test]
    fn test_motion_json_uses_loop_key() {
        let json = r#"{"index":2,"num_sprites":6,"loop":true}"#;
        let motion: Motion = serde_json::from_str(json).unwrap();
        assert_eq!(motion, Motion::new(2, 6, true));
    }
}
