//! Bewegt ein Objekt mit konstanter Parametergeschwindigkeit entlang eines Pfads.

use super::streaming::StreamingTrack;
use crate::shared::options::FollowerOptions;
use glam::Vec3;
use track_path_engine::{CubicBezierPath, PathError};

/// Vorausschau im normierten Parameter für die Blickrichtung.
const LOOK_AHEAD: f32 = 0.01;

/// Position und Blickrichtung eines Followers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerPose {
    pub position: Vec3,
    /// Normiert; `Vec3::ZERO` bei degeneriertem Pfad
    pub direction: Vec3,
}

/// Zustand eines Pfad-Followers.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFollower {
    /// Normierte Position in [0, 1]
    t: f32,
    /// Prozent der Pfadlänge pro Sekunde
    pub speed: f32,
    pub offset: Vec3,
    pub looping: bool,
    pub generate_ahead: bool,
}

impl PathFollower {
    pub fn new(options: &FollowerOptions) -> Self {
        Self {
            t: options.start_position.clamp(0.0, 1.0),
            speed: options.speed,
            offset: options.offset,
            looping: options.looping,
            generate_ahead: options.generate_ahead,
        }
    }

    /// Aktuelle normierte Position.
    pub fn t(&self) -> f32 {
        self.t
    }

    /// Setzt die normierte Position (auf [0, 1] begrenzt).
    pub fn set_t(&mut self, t: f32) {
        self.t = t.clamp(0.0, 1.0);
    }

    /// Pose bei der aktuellen Position, ohne weiterzurücken.
    pub fn pose(&self, path: &CubicBezierPath) -> FollowerPose {
        let here = path.evaluate_normalized(self.t);
        let ahead = path.evaluate_normalized(self.t + LOOK_AHEAD);
        let mut direction = ahead - here;
        // Am offenen Ende ist die Vorausschau abgeschnitten
        if direction.length_squared() <= f32::EPSILON {
            direction = path.tangent_normalized(self.t);
        }
        FollowerPose {
            position: here + self.offset,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ein Zeitschritt: gibt die Pose an der aktuellen Position zurück und rückt `t` vor.
    ///
    /// Ab `t >= 1` springt ein loopender Follower auf 0 zurück, ein nicht
    /// loopender bleibt stehen; in beiden Fällen gibt es für diesen Schritt `None`.
    pub fn step(&mut self, path: &CubicBezierPath, dt: f32) -> Option<FollowerPose> {
        if self.t < 1.0 {
            let pose = self.pose(path);
            self.t += self.speed / 100.0 * dt;
            return Some(pose);
        }
        if self.looping {
            self.t = 0.0;
        }
        None
    }

    /// Wie [`Self::step`], schiebt aber das Fenster einer Endlos-Strecke weiter,
    /// sobald der Follower den Anfang des dritten Segments erreicht.
    ///
    /// Danach steht `t` wieder am Anfang des zweiten Segments.
    pub fn follow(
        &mut self,
        track: &mut StreamingTrack,
        dt: f32,
    ) -> Result<Option<FollowerPose>, PathError> {
        let path = track.snapshot();
        let pose = self.step(&path, dt);

        if let (true, Some(pose)) = (self.generate_ahead, pose) {
            let reset = 1.0 / path.num_curve_segments() as f32;
            let threshold_z = path.evaluate_normalized(reset * 2.0).z;
            if pose.position.z >= threshold_z {
                track.advance_window()?;
                self.t = reset;
                log::debug!("Follower zurückgesetzt auf t = {reset}");
            }
        }
        Ok(pose)
    }
}
