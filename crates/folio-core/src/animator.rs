//! Keyed collection of element transforms and the tweens driving them.

use crate::tween::{Prop, Sample, Transform, Tween, TweenSpec};
use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Opaque handle of an animated element. The web layer maps these to DOM
/// nodes; the animator never sees the DOM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

/// What happens to running tweens on the same target and property when a
/// new tween starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overwrite {
    /// Kill them; the new tween continues from the current value.
    Auto,
    /// Keep them running; once started, the newest tween renders last.
    None,
}

#[derive(Default)]
struct TargetState {
    rendered: Transform,
    tweens: SmallVec<[Tween; 4]>,
    dirty: bool,
}

#[derive(Default)]
pub struct Animator {
    targets: FnvHashMap<TargetId, TargetState>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Make sure `target` exists with an identity transform.
    pub fn register(&mut self, target: TargetId) {
        self.targets.entry(target).or_default();
    }

    pub fn remove_target(&mut self, target: TargetId) -> bool {
        self.targets.remove(&target).is_some()
    }

    /// Jump a channel to `value`, killing tweens on that channel.
    pub fn set(&mut self, target: TargetId, prop: Prop, value: f32) {
        let state = self.targets.entry(target).or_default();
        state.tweens.retain(|t| t.prop != prop);
        state.rendered.set(prop, value);
        state.dirty = true;
    }

    pub fn set_perspective(&mut self, target: TargetId, perspective: Option<f32>) {
        let state = self.targets.entry(target).or_default();
        state.rendered.perspective = perspective;
        state.dirty = true;
    }

    /// Tween a channel from wherever it is when the tween starts to `value`.
    pub fn to(
        &mut self,
        target: TargetId,
        prop: Prop,
        value: f32,
        spec: TweenSpec,
        overwrite: Overwrite,
        now: f64,
    ) {
        let state = self.targets.entry(target).or_default();
        if overwrite == Overwrite::Auto {
            state.tweens.retain(|t| t.prop != prop);
        }
        state.tweens.push(Tween {
            prop,
            from: None,
            to: value,
            spec,
            created_at: now,
        });
    }

    /// Render `value` immediately, then tween back to the channel's current
    /// value once the delay has elapsed.
    pub fn from(&mut self, target: TargetId, prop: Prop, value: f32, spec: TweenSpec, now: f64) {
        let state = self.targets.entry(target).or_default();
        state.tweens.retain(|t| t.prop != prop);
        let rest = state.rendered.get(prop);
        state.rendered.set(prop, value);
        state.dirty = true;
        state.tweens.push(Tween {
            prop,
            from: Some(value),
            to: rest,
            spec,
            created_at: now,
        });
    }

    /// Advance every tween to `now`. Returns the targets whose rendered
    /// transform changed since the previous tick.
    pub fn tick(&mut self, now: f64) -> Vec<TargetId> {
        let mut dirty = Vec::new();
        for (id, state) in self.targets.iter_mut() {
            let TargetState {
                rendered,
                tweens,
                dirty: was_dirty,
            } = state;
            let mut touched = std::mem::take(was_dirty);
            // tweens are kept in creation order, so the newest one wins
            tweens.retain(|tween| match tween.sample(now, rendered.get(tween.prop)) {
                Sample::Pending => true,
                Sample::Active(v) => {
                    rendered.set(tween.prop, v);
                    touched = true;
                    true
                }
                Sample::Done(v) => {
                    rendered.set(tween.prop, v);
                    touched = true;
                    false
                }
            });
            if touched {
                dirty.push(*id);
            }
        }
        dirty.sort_unstable();
        dirty
    }

    pub fn transform(&self, target: TargetId) -> Option<Transform> {
        self.targets.get(&target).map(|s| s.rendered)
    }

    pub fn value(&self, target: TargetId, prop: Prop) -> Option<f32> {
        self.targets.get(&target).map(|s| s.rendered.get(prop))
    }

    pub fn is_animating(&self, target: TargetId) -> bool {
        self.targets
            .get(&target)
            .map(|s| !s.tweens.is_empty())
            .unwrap_or(false)
    }

    pub fn active_tweens(&self, target: TargetId) -> usize {
        self.targets.get(&target).map(|s| s.tweens.len()).unwrap_or(0)
    }
}
