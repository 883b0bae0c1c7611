mod tests {
    use fadebank::{Channel, Duties, PwmOutput, RampEngine};

    /// Output stage fake that records the last applied duties.
    #[derive(Default)]
    struct RecordingOutput {
        duties: Duties,
        writes: usize,
    }

    impl PwmOutput for RecordingOutput {
        fn set_duty(&mut self, channel: Channel, duty: u8) {
            self.duties[channel.index()] = duty;
            self.writes += 1;
        }
    }

    fn tick_n(engine: &RampEngine, output: &mut RecordingOutput, n: usize) {
        for _ in 0..n {
            engine.on_tick(output);
        }
    }

    #[test]
    fn test_first_step_after_fade_ticks_plus_one() {
        let engine = RampEngine::new();
        let mut output = RecordingOutput::default();

        engine.begin_ramp([1, 0, 0, 0], 2, 1);
        assert!(engine.is_busy());

        // First tick after acceptance is a pure wait; no hardware writes
        // until the counter runs out.
        tick_n(&engine, &mut output, 2);
        assert_eq!(output.writes, 0);
        assert_eq!(engine.duties(), [0, 0, 0, 0]);

        // fade_ticks + 1 = 3rd tick performs the step and converges.
        engine.on_tick(&mut output);
        assert_eq!(output.duties, [1, 0, 0, 0]);
        assert_eq!(engine.duties(), [1, 0, 0, 0]);
        assert!(engine.is_busy());
    }

    #[test]
    fn test_zero_fade_steps_every_tick() {
        let engine = RampEngine::new();
        let mut output = RecordingOutput::default();

        engine.begin_ramp([3, 0, 0, 0], 0, 1);
        engine.on_tick(&mut output);
        assert_eq!(output.duties, [1, 0, 0, 0]);
        engine.on_tick(&mut output);
        assert_eq!(output.duties, [2, 0, 0, 0]);
        engine.on_tick(&mut output);
        assert_eq!(output.duties, [3, 0, 0, 0]);
    }

    #[test]
    fn test_monotone_convergence_and_holding_on_slowest_channel() {
        let engine = RampEngine::new();
        let mut output = RecordingOutput::default();

        engine.set_immediate(&mut output, [5, 0, 9, 4]);
        let start = engine.duties();
        let targets: Duties = [8, 1, 9, 0];
        engine.begin_ramp(targets, 0, 1);

        // Largest distance is 4 (Ch4); converged after exactly 4 ticks.
        let mut prev = start;
        for tick in 1..=4 {
            engine.on_tick(&mut output);
            let now = engine.duties();
            for ch in Channel::ALL {
                let i = ch.index();
                let lo = start[i].min(targets[i]);
                let hi = start[i].max(targets[i]);
                assert!(now[i] >= lo && now[i] <= hi, "overshoot on tick {tick}");
                assert!(now[i].abs_diff(prev[i]) <= 1);
            }
            prev = now;
        }
        assert_eq!(engine.duties(), targets);
        assert_eq!(output.duties, targets);

        // Still busy: the hold phase follows convergence.
        assert!(engine.is_busy());
    }

    #[test]
    fn test_holding_lasts_exactly_ten_ticks_per_hold_unit() {
        let engine = RampEngine::new();
        let mut output = RecordingOutput::default();

        // Distance 1 with fade 0: convergence on the first tick.
        engine.begin_ramp([1, 0, 0, 0], 0, 2);
        engine.on_tick(&mut output);
        assert_eq!(engine.duties(), [1, 0, 0, 0]);

        // hold = 2 units = 20 base ticks after the converging tick.
        tick_n(&engine, &mut output, 19);
        assert!(engine.is_busy());
        engine.on_tick(&mut output);
        assert!(!engine.is_busy());

        // No further writes once idle.
        let writes = output.writes;
        tick_n(&engine, &mut output, 5);
        assert_eq!(output.writes, writes);
        assert_eq!(output.duties, [1, 0, 0, 0]);
    }

    #[test]
    fn test_begin_ramp_while_busy_is_a_no_op() {
        let engine = RampEngine::new();
        let mut output = RecordingOutput::default();

        engine.begin_ramp([4, 4, 4, 4], 1, 1);
        assert!(engine.is_busy());

        // Speculative second ramp must change nothing.
        engine.begin_ramp([200, 200, 200, 200], 0, 0);
        assert_eq!(engine.duties(), [0, 0, 0, 0]);

        // Run the first ramp to completion; it converges to its own
        // targets, not the rejected ones.
        tick_n(&engine, &mut output, 100);
        assert!(!engine.is_busy());
        assert_eq!(output.duties, [4, 4, 4, 4]);
    }

    #[test]
    fn test_set_immediate_cancels_active_fade() {
        let engine = RampEngine::new();
        let mut output = RecordingOutput::default();

        engine.begin_ramp([100, 100, 100, 100], 1, 1);
        tick_n(&engine, &mut output, 6);
        assert!(engine.is_busy());

        engine.set_immediate(&mut output, [7, 8, 9, 10]);
        assert!(!engine.is_busy());
        assert_eq!(output.duties, [7, 8, 9, 10]);
        assert_eq!(engine.duties(), [7, 8, 9, 10]);

        // A tick landing right after the cancellation must not step with
        // the stale targets.
        engine.on_tick(&mut output);
        assert_eq!(output.duties, [7, 8, 9, 10]);
        assert!(!engine.is_busy());
    }

    #[test]
    fn test_engine_is_reusable_after_completion() {
        let engine = RampEngine::new();
        let mut output = RecordingOutput::default();

        engine.begin_ramp([2, 0, 0, 0], 0, 1);
        tick_n(&engine, &mut output, 50);
        assert!(!engine.is_busy());

        engine.begin_ramp([0, 0, 0, 2], 0, 1);
        assert!(engine.is_busy());
        tick_n(&engine, &mut output, 50);
        assert!(!engine.is_busy());
        assert_eq!(output.duties, [0, 0, 0, 2]);
    }
}
