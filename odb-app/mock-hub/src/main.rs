use clap::Parser;
use embassy_executor::{Executor, Spawner};
use embassy_time::{Duration, Timer};
use odb_core::mk_static;
use odb_core::utils::RobotConfig;
use odb_core::utils::config::ConfigError;
use odb_core::utils::controllers::claw::ClawTargets;
use odb_core::utils::controllers::{DrivePort, GAMEPAD_CHANNEL, GamepadSample, TeleopController};
use odb_core::utils::math::drive::DriveCommand;
use std::convert::Infallible;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts
{
    /// JSON robot configuration; missing fields keep their defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// JSON array of gamepad samples to replay instead of the built-in drill
    #[clap(long)]
    script: Option<PathBuf>,
    /// control period in milliseconds
    #[clap(long, default_value_t = 50)]
    period_ms: u64,
}

#[derive(Debug)]
enum SetupError {
    Io(PathBuf, std::io::Error),
    Config(ConfigError),
    Script(serde_json::Error),
}

/// Drive port that logs to console instead of moving motors.
struct ConsoleDrive;

impl DrivePort for ConsoleDrive {
    type Error = Infallible;

    fn set_wheel_powers(
        &mut self,
        command: &DriveCommand,
    ) -> Result<(), Self::Error> {
        let (lr, rf, lf, rr) = command.as_tuple();
        info!("wheels lr={:+.3} rf={:+.3} lf={:+.3} rr={:+.3}", lr, rf, lf, rr);
        Ok(())
    }

    fn set_claw(
        &mut self,
        targets: &ClawTargets,
    ) -> Result<(), Self::Error> {
        info!(
            "claw lb={:.3} rb={:.3} lt={:.3} rt={:.3}",
            targets.left_bottom, targets.right_bottom, targets.left_top, targets.right_top
        );
        Ok(())
    }
}

#[embassy_executor::task]
async fn teleop_task(mut ctrl: TeleopController<ConsoleDrive>) -> ! {
    ctrl.run().await
}

#[embassy_executor::task]
async fn gamepad_task(script: Vec<GamepadSample>, period: Duration) {
    for sample in script {
        GAMEPAD_CHANNEL.send(sample).await;
        Timer::after(period).await;
    }
    // Leave the robot stopped before exiting.
    GAMEPAD_CHANNEL.send(GamepadSample::default()).await;
    Timer::after(period).await;
    info!("script finished");
    std::process::exit(0);
}

fn read(path: &PathBuf) -> Result<String, SetupError> {
    std::fs::read_to_string(path).map_err(|e| SetupError::Io(path.clone(), e))
}

fn load_config(opts: &Opts) -> Result<RobotConfig, SetupError> {
    match &opts.config {
        Some(path) => RobotConfig::from_json(&read(path)?).map_err(SetupError::Config),
        None => Ok(RobotConfig::default()),
    }
}

fn load_script(opts: &Opts) -> Result<Vec<GamepadSample>, SetupError> {
    match &opts.script {
        Some(path) => serde_json::from_str(&read(path)?).map_err(SetupError::Script),
        None => Ok(drill()),
    }
}

/// Forward, strafe, speed up, spin, then work the claw.
fn drill() -> Vec<GamepadSample> {
    let idle = GamepadSample::default();
    let hold = |sample: GamepadSample, cycles: usize| core::iter::repeat(sample).take(cycles);

    let mut script = Vec::new();
    script.extend(hold(GamepadSample { left_stick_y: 1.0, ..idle }, 20));
    script.extend(hold(GamepadSample { left_stick_x: -1.0, ..idle }, 20));
    script.extend(hold(GamepadSample { a: true, ..idle }, 3));
    script.extend(hold(GamepadSample { left_trigger: 1.0, ..idle }, 20));
    script.extend(hold(GamepadSample { right_trigger: 0.5, left_stick_y: 1.0, ..idle }, 10));
    script.extend(hold(GamepadSample { b: true, ..idle }, 3));
    script.extend(hold(GamepadSample { right_bumper: true, ..idle }, 10));
    script.extend(hold(GamepadSample { left_stick_button: true, ..idle }, 1));
    script
}

#[embassy_executor::task]
async fn main_task(spawner: Spawner) {
    let opts: Opts = Opts::parse();

    let setup = load_config(&opts).and_then(|config| Ok((config, load_script(&opts)?)));
    let (config, script) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            error!("setup failed: {:?}", e);
            std::process::exit(1);
        }
    };

    let ctrl = match TeleopController::new(ConsoleDrive, config) {
        Ok(ctrl) => ctrl,
        Err(e) => {
            error!("invalid robot config: {:?}", e);
            std::process::exit(1);
        }
    };

    info!(samples = script.len(), period_ms = opts.period_ms, "starting mock hub");
    if let Err(e) = spawner.spawn(teleop_task(ctrl)) {
        error!("failed to spawn teleop task: {:?}", e);
        std::process::exit(1);
    }
    if let Err(e) = spawner.spawn(gamepad_task(script, Duration::from_millis(opts.period_ms))) {
        error!("failed to spawn gamepad task: {:?}", e);
        std::process::exit(1);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let executor = mk_static!(Executor, Executor::new());
    executor.run(|spawner| {
        if let Err(e) = spawner.spawn(main_task(spawner)) {
            error!("failed to spawn main task: {:?}", e);
            std::process::exit(1);
        }
    });
}
