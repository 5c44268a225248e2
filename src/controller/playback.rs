use crate::{
    animation::ease::Ease,
    animation::spec::{AnimationSpec, Endpoints, TweenMode},
    animation::timeline::Timeline,
    dom::document::Document,
    foundation::core::Millis,
    foundation::ids::ElementId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Before,
    Active,
    Done,
}

#[derive(Clone, Debug)]
struct Track {
    target: ElementId,
    begin: Millis,
    // Resolved lazily for `To` tweens so they start from whatever earlier entries left behind.
    ends: Option<Endpoints>,
    phase: Phase,
}

#[derive(Clone, Debug)]
struct ScheduledEntry {
    spec: AnimationSpec,
    tracks: Vec<Track>,
}

/// Playback direction of a [`TimelinePlayer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Direction {
    #[default]
    Paused,
    Forward,
    Backward,
}

/// Reported when playback reaches either end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerEvent {
    Completed,
    Reversed,
}

/// Seekable playhead over a scheduled [`Timeline`].
///
/// Values are written to the document only for tracks that are active or that just changed
/// phase, so tracks before their start or after their end do not fight over shared
/// properties.
#[derive(Clone, Debug)]
pub(crate) struct TimelinePlayer {
    entries: Vec<ScheduledEntry>,
    fallback_ease: Ease,
    // `None` for loops, which never complete.
    duration: Option<Millis>,
    position: Millis,
    direction: Direction,
}

impl TimelinePlayer {
    pub(crate) fn new(timeline: &Timeline, fallback_ease: Ease) -> Self {
        let spans = timeline.schedule();
        let entries = timeline
            .entries()
            .iter()
            .zip(&spans)
            .map(|(entry, span)| {
                let offsets = entry.spec.start_offsets(entry.targets.len());
                let tracks = entry
                    .targets
                    .iter()
                    .zip(offsets)
                    .map(|(&target, off)| Track {
                        target,
                        begin: span.start.saturating_add(off),
                        ends: None,
                        phase: Phase::Pending,
                    })
                    .collect();
                ScheduledEntry {
                    spec: entry.spec.clone(),
                    tracks,
                }
            })
            .collect();
        Self {
            entries,
            fallback_ease: timeline.default_ease().unwrap_or(fallback_ease),
            duration: Some(timeline.duration()),
            position: Millis::ZERO,
            direction: Direction::Paused,
        }
    }

    /// Endless player for a repeating spec over `targets`.
    pub(crate) fn looping(spec: AnimationSpec, targets: Vec<ElementId>, fallback: Ease) -> Self {
        let timeline = Timeline::new().then(spec, targets);
        let mut player = Self::new(&timeline, fallback);
        player.duration = None;
        player
    }

    /// Render the starting values of `From`/`FromTo` tracks so elements hide before entry.
    pub(crate) fn prime(&mut self, doc: &mut Document) {
        for entry in &mut self.entries {
            if entry.spec.mode == TweenMode::To {
                continue;
            }
            for track in &mut entry.tracks {
                let Some(state) = doc.attached(track.target).map(|e| &e.visual) else {
                    continue;
                };
                let ends = entry.spec.resolve(state);
                doc.commit(track.target, &ends.from);
                track.ends = Some(ends);
                track.phase = Phase::Before;
            }
        }
    }

    pub(crate) fn play(&mut self) {
        self.direction = Direction::Forward;
    }

    pub(crate) fn reverse(&mut self) {
        self.direction = Direction::Backward;
    }

    /// Jump back to the start and play forward.
    pub(crate) fn restart(&mut self) {
        self.position = Millis::ZERO;
        self.direction = Direction::Forward;
    }

    /// Jump back to the start, stop, and render the starting values.
    pub(crate) fn rewind(&mut self, doc: &mut Document) {
        self.position = Millis::ZERO;
        self.direction = Direction::Paused;
        self.render(doc);
    }

    pub(crate) fn pause(&mut self) {
        self.direction = Direction::Paused;
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.direction != Direction::Paused
    }

    pub(crate) fn position(&self) -> Millis {
        self.position
    }

    /// Move the playhead by `dt` in the current direction and render.
    ///
    /// A zero `dt` still renders and reports reaching an end, which lets zero-length
    /// timelines complete as soon as they are played.
    pub(crate) fn advance(&mut self, dt: Millis, doc: &mut Document) -> Option<PlayerEvent> {
        let event = match self.direction {
            Direction::Paused => return None,
            Direction::Forward => {
                self.position = self.position.saturating_add(dt);
                match self.duration {
                    Some(d) if self.position >= d => {
                        self.position = d;
                        Some(PlayerEvent::Completed)
                    }
                    _ => None,
                }
            }
            Direction::Backward => {
                self.position = self.position.saturating_sub(dt);
                (self.position == Millis::ZERO).then_some(PlayerEvent::Reversed)
            }
        };
        self.render(doc);
        if event.is_some() {
            self.direction = Direction::Paused;
        }
        event
    }

    fn render(&mut self, doc: &mut Document) {
        let position = self.position;
        for entry in &mut self.entries {
            let active_len = entry.spec.active_len();
            for track in &mut entry.tracks {
                let (phase, local) = if position < track.begin {
                    (Phase::Before, Millis::ZERO)
                } else {
                    let local = position.saturating_sub(track.begin);
                    match active_len {
                        Some(len) if local >= len => (Phase::Done, local),
                        _ => (Phase::Active, local),
                    }
                };
                if track.ends.is_none() {
                    if phase == Phase::Before {
                        continue;
                    }
                    let Some(el) = doc.attached(track.target) else {
                        continue;
                    };
                    track.ends = Some(entry.spec.resolve(&el.visual));
                }
                let Some(ends) = track.ends.as_ref() else {
                    continue;
                };
                if phase == Phase::Active || phase != track.phase {
                    let values = entry.spec.sample(ends, local, self.fallback_ease);
                    doc.commit(track.target, &values);
                }
                track.phase = phase;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/playback.rs"]
mod tests;
