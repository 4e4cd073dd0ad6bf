//! GPIO / peripheral pin assignments for the rover main board (ESP32-S3).
//!
//! Single source of truth for the wiring.  `main` takes the typed pins
//! from `esp-idf-hal` that match these numbers; change a pin here and in
//! the matching `peripherals.pins.gpioN` together.

// ---------------------------------------------------------------------------
// Propulsion motor (L293D H-bridge, channel A)
// ---------------------------------------------------------------------------

/// Direction input 1: HIGH with IN2 LOW = forward.
pub const MOTOR_IN1_GPIO: i32 = 15;
pub const MOTOR_IN2_GPIO: i32 = 16;
/// Enable, driven by LEDC so the bridge can be fully cut.
pub const MOTOR_EN_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// MQ-2 analog output.  ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const GAS_ADC_GPIO: i32 = 1;
/// DHT11 single-wire data line (open-drain, 10 kΩ pull-up).
pub const DHT_GPIO: i32 = 12;
/// HC-SR04 trigger output.
pub const ULTRASONIC_TRIG_GPIO: i32 = 10;
/// HC-SR04 echo input (via 5 V → 3.3 V divider).
pub const ULTRASONIC_ECHO_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// Status outputs
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 5;
pub const LED_G_GPIO: i32 = 6;
pub const LED_B_GPIO: i32 = 7;

/// Passive piezo buzzer.
pub const BUZZER_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Power switch (IR receiver decoder output, active HIGH)
// ---------------------------------------------------------------------------

pub const POWER_SWITCH_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// I²C buses
// ---------------------------------------------------------------------------

/// I2C0: 16×2 LCD backpack.
pub const LCD_I2C_SDA_GPIO: i32 = 8;
pub const LCD_I2C_SCL_GPIO: i32 = 18;
/// I2C1: MPU-6050.
pub const IMU_I2C_SDA_GPIO: i32 = 38;
pub const IMU_I2C_SCL_GPIO: i32 = 39;

pub const LCD_ADDRESS: u8 = 0x27;
pub const MPU_ADDRESS: u8 = 0x68;

pub const I2C_BAUDRATE_HZ: u32 = 100_000;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer 0: motor enable + RGB LED.
pub const OUTPUT_PWM_FREQ_HZ: u32 = 5_000;
/// LEDC timer 1: buzzer only; retuned per tone.
pub const BUZZER_LEDC_TIMER: u32 = 1;
/// Initial buzzer timer frequency before the first tone.
pub const BUZZER_BASE_FREQ_HZ: u32 = 1_000;

/// Every GPIO in use, for the boot log and the overlap check.
pub const ALL_GPIOS: [i32; 16] = [
    MOTOR_IN1_GPIO,
    MOTOR_IN2_GPIO,
    MOTOR_EN_GPIO,
    GAS_ADC_GPIO,
    DHT_GPIO,
    ULTRASONIC_TRIG_GPIO,
    ULTRASONIC_ECHO_GPIO,
    LED_R_GPIO,
    LED_G_GPIO,
    LED_B_GPIO,
    BUZZER_GPIO,
    POWER_SWITCH_GPIO,
    LCD_I2C_SDA_GPIO,
    LCD_I2C_SCL_GPIO,
    IMU_I2C_SDA_GPIO,
    IMU_I2C_SCL_GPIO,
];
