/// Stats granted by body armor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyStats {
    pub armor: i32,
    /// Multiplier applied to the wearer's base movement speed.
    pub speed_modifier: f64,
}

/// Stats granted by headgear. The trade is peripheral vision for protection
/// or utility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadStats {
    pub armor: i32,
    /// Width of the wearer's vision cone, in degrees.
    pub fov_degrees: f64,
}

/// Stats of a held weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    /// Shots per second while the trigger is held.
    pub fire_rate: f64,
    pub damage: i32,
    /// Maximum aim deviation, in degrees.
    pub spread_degrees: f64,
    /// Distance a bullet flies before it dies, in world units.
    pub range: f64,
    /// Bullet travel speed, in world units per second.
    pub bullet_speed: f64,
    pub bullet_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    None,
    Light,
    Heavy,
}

impl BodyKind {
    pub fn stats(self) -> BodyStats {
        match self {
            BodyKind::None => BodyStats {
                armor: 0,
                speed_modifier: 1.0,
            },
            BodyKind::Light => BodyStats {
                armor: 1,
                speed_modifier: 0.9,
            },
            BodyKind::Heavy => BodyStats {
                armor: 2,
                speed_modifier: 0.8,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyKind::None => "none",
            BodyKind::Light => "light armor",
            BodyKind::Heavy => "heavy armor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadKind {
    None,
    GasMask,
    Helmet,
    NightVision,
}

impl HeadKind {
    pub const ALL: [HeadKind; 4] = [
        HeadKind::None,
        HeadKind::GasMask,
        HeadKind::Helmet,
        HeadKind::NightVision,
    ];

    pub fn stats(self) -> HeadStats {
        match self {
            HeadKind::None => HeadStats {
                armor: 0,
                fov_degrees: 120.0,
            },
            HeadKind::GasMask => HeadStats {
                armor: 0,
                fov_degrees: 60.0,
            },
            HeadKind::Helmet => HeadStats {
                armor: 1,
                fov_degrees: 90.0,
            },
            HeadKind::NightVision => HeadStats {
                armor: 0,
                fov_degrees: 90.0,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeadKind::None => "bare head",
            HeadKind::GasMask => "gas mask",
            HeadKind::Helmet => "helmet",
            HeadKind::NightVision => "night vision",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponKind {
    Pistol,
    SilencedPistol,
    Uzi,
    AssaultRifle,
    Shotgun,
    Taser,
    GasMarker,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 7] = [
        WeaponKind::Pistol,
        WeaponKind::SilencedPistol,
        WeaponKind::Uzi,
        WeaponKind::AssaultRifle,
        WeaponKind::Shotgun,
        WeaponKind::Taser,
        WeaponKind::GasMarker,
    ];

    pub fn stats(self) -> WeaponStats {
        match self {
            WeaponKind::Pistol => weapon(2.0, 15, 5.0, 1000.0, 1.0),
            WeaponKind::SilencedPistol => weapon(2.0, 10, 0.0, 1000.0, 1.0),
            WeaponKind::Uzi => weapon(4.0, 10, 30.0, 1500.0, 1.0),
            WeaponKind::AssaultRifle => weapon(3.0, 10, 8.0, 2000.0, 1.0),
            WeaponKind::Shotgun => weapon(1.0, 15, 30.0, 750.0, 1.0),
            WeaponKind::Taser => weapon(1.0, 0, 2.0, 250.0, 1.0),
            WeaponKind::GasMarker => weapon(2.0, 0, 8.0, 2000.0, 2.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Pistol => "pistol",
            WeaponKind::SilencedPistol => "silenced pistol",
            WeaponKind::Uzi => "uzi",
            WeaponKind::AssaultRifle => "assault rifle",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Taser => "taser",
            WeaponKind::GasMarker => "gas marker",
        }
    }

    /// Next weapon in the cycle order, wrapping at the end.
    pub fn next(self) -> WeaponKind {
        let i = Self::ALL.iter().position(|&w| w == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous weapon in the cycle order, wrapping at the start.
    pub fn prev(self) -> WeaponKind {
        let i = Self::ALL.iter().position(|&w| w == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// All bullets fly at the same speed; only the marker round is fatter.
fn weapon(
    fire_rate: f64,
    damage: i32,
    spread_degrees: f64,
    range: f64,
    bullet_radius: f64,
) -> WeaponStats {
    WeaponStats {
        fire_rate,
        damage,
        spread_degrees,
        range,
        bullet_speed: 800.0,
        bullet_radius,
    }
}
