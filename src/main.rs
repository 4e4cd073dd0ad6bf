//! ReconUAV firmware — ESP-IDF entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  SensorHub          ActuatorBank        LogEventSink         │
//! │  (SensorPort)       (ActuatorPort)      (EventSink)          │
//! │  PowerSwitch        PollScheduler       UptimeClock          │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              AppService (pure logic)                   │  │
//! │  │  Acquisition · HazardPolicy · StateMachine · Rotator   │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;

use reconuav::adapters::esp::LedcTone;
use reconuav::adapters::hardware::ActuatorBank;
use reconuav::adapters::log_sink::LogEventSink;
use reconuav::adapters::time::UptimeClock;
use reconuav::app::service::AppService;
use reconuav::config::SystemConfig;
use reconuav::display::StatusPage;
use reconuav::drivers::buzzer::Buzzer;
use reconuav::drivers::lcd::CharacterLcd;
use reconuav::drivers::motor::MotorDriver;
use reconuav::drivers::power_switch::PowerSwitch;
use reconuav::drivers::status_led::StatusLed;
use reconuav::error::SensorError;
use reconuav::pins;
use reconuav::scheduler::PollScheduler;
use reconuav::sensors::climate::Dht11;
use reconuav::sensors::gas::{GasSensor, ADC_FULL_SCALE_12BIT};
use reconuav::sensors::orientation::Mpu6050;
use reconuav::sensors::ranging::UltrasonicRanger;
use reconuav::sensors::SensorHub;

/// Baked-in configuration; missing fields take their defaults.
const ROVER_CONFIG_JSON: &str = include_str!("../config/rover.json");

/// Main loop period.  Only the power switch needs this resolution.
const LOOP_PERIOD_MS: u32 = 10;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ReconUAV v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
    info!("GPIO map: {:?}", pins::ALL_GPIOS);

    // ── 2. Configuration ──────────────────────────────────────
    let config = match SystemConfig::from_json(ROVER_CONFIG_JSON) {
        Ok(cfg) => {
            info!("Config loaded");
            cfg
        }
        Err(e) => {
            warn!("Baked-in config rejected ({}), using defaults", e);
            SystemConfig::default()
        }
    };

    // ── 3. Peripherals ────────────────────────────────────────
    let p = Peripherals::take()?;

    let output_timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::new().frequency(Hertz(pins::OUTPUT_PWM_FREQ_HZ)),
    )?;
    let buzzer_timer = LedcTimerDriver::new(
        p.ledc.timer1,
        &TimerConfig::new().frequency(Hertz(pins::BUZZER_BASE_FREQ_HZ)),
    )?;

    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ));
    let lcd_bus = I2cDriver::new(p.i2c0, p.pins.gpio8, p.pins.gpio18, &i2c_config)?;
    let imu_bus = I2cDriver::new(p.i2c1, p.pins.gpio38, p.pins.gpio39, &i2c_config)?;

    // Splash while the rest comes up.
    let mut lcd = CharacterLcd::new(lcd_bus, Ets, pins::LCD_ADDRESS);
    lcd.splash(&StatusPage::Initializing.render())?;

    // ── 4. Sensors ────────────────────────────────────────────
    let mut dht_pin = PinDriver::input_output_od(p.pins.gpio12)?;
    dht_pin.set_pull(Pull::Up)?;
    dht_pin.set_high()?;

    let adc = AdcDriver::new(p.adc1)?;
    let mut mq2 = AdcChannelDriver::new(
        &adc,
        p.pins.gpio1,
        &AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        },
    )?;
    let gas_source = || adc.read(&mut mq2).map_err(|_| SensorError::ReadFailed);

    let ranger = UltrasonicRanger::new(
        PinDriver::output(p.pins.gpio10)?,
        PinDriver::input(p.pins.gpio11)?,
        Ets,
        UptimeClock::new(),
        config.ranging_timeout_us,
    );

    let mut imu = Mpu6050::new(imu_bus, pins::MPU_ADDRESS);
    if let Err(e) = imu.init() {
        // Orientation reads will fail and be reported per poll.
        warn!("MPU-6050 init failed: {}", e);
    }

    let mut sensors = SensorHub::new(
        Dht11::new(dht_pin, Ets),
        GasSensor::new(gas_source, ADC_FULL_SCALE_12BIT, config.gas_full_scale),
        ranger,
        imu,
    );

    // ── 5. Actuators ──────────────────────────────────────────
    let motor = MotorDriver::new(
        PinDriver::output(p.pins.gpio15)?,
        PinDriver::output(p.pins.gpio16)?,
        LedcDriver::new(p.ledc.channel0, &output_timer, p.pins.gpio17)?,
    );
    let led = StatusLed::new(
        LedcDriver::new(p.ledc.channel1, &output_timer, p.pins.gpio5)?,
        LedcDriver::new(p.ledc.channel2, &output_timer, p.pins.gpio6)?,
        LedcDriver::new(p.ledc.channel3, &output_timer, p.pins.gpio7)?,
    );
    let tone = LedcTone::new(
        LedcDriver::new(p.ledc.channel4, &buzzer_timer, p.pins.gpio9)?,
        pins::BUZZER_LEDC_TIMER,
    );

    let mut actuators = ActuatorBank::new(motor, led, Buzzer::new(tone, FreeRtos), lcd, &config);

    let mut power_pin = PinDriver::input(p.pins.gpio2)?;
    power_pin.set_pull(Pull::Down)?;
    let mut power_switch = PowerSwitch::new(power_pin, true);

    // ── 6. Application service ────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut app = AppService::new(&config);
    app.start(&mut actuators, &mut sink);

    let clock = UptimeClock::new();
    let mut scheduler = PollScheduler::new(config.poll_interval_ms);

    info!("System ready. Entering main loop.");

    // ── 7. Main loop ──────────────────────────────────────────
    loop {
        let now_ms = clock.now_ms();

        if let Some(cmd) = power_switch.poll(now_ms) {
            info!("Power switch: {:?}", cmd);
            app.handle_command(cmd, &mut actuators, &mut sink);
        }

        if let Some(tick) = scheduler.due(now_ms) {
            app.poll(&mut sensors, &mut actuators, &mut sink, tick.rotation_index);
        }

        FreeRtos::delay_ms(LOOP_PERIOD_MS);
    }
}
