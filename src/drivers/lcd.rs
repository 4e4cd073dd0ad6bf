//! 16×2 HD44780 character LCD behind a PCF8574 I²C backpack.
//!
//! The backpack maps its eight output bits to the LCD bus:
//!
//! ```text
//!  bit  7   6   5   4   3          2    1    0
//!       D7  D6  D5  D4  BACKLIGHT  EN   RW   RS
//! ```
//!
//! The controller runs in 4-bit mode, so every byte is clocked out as two
//! nibbles, each latched by pulsing EN.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::TextDisplay;
use crate::display::{DisplayPage, LCD_COLS};
use crate::error::{ActuatorError, Error};

const RS: u8 = 0b0000_0001;
const EN: u8 = 0b0000_0100;
const BACKLIGHT: u8 = 0b0000_1000;

const CMD_CLEAR: u8 = 0x01;
const CMD_HOME: u8 = 0x02;
const CMD_ENTRY_LEFT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

pub struct CharacterLcd<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    backlight: bool,
}

impl<I, D> CharacterLcd<I, D>
where
    I: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: true,
        }
    }

    /// Power-on initialisation into 4-bit, two-line mode.
    pub fn init(&mut self) -> Result<(), ActuatorError> {
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1);

        // Three "function set 8-bit" nibbles, then switch to 4-bit.
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20, 0)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_LEFT)?;
        self.command(CMD_HOME)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Bring the panel up and show `page`.  A controller that never
    /// initialises is a boot failure, not a transient write error.
    pub fn splash(&mut self, page: &DisplayPage) -> crate::error::Result<()> {
        self.init().map_err(|_| Error::Init("character LCD"))?;
        self.show(page).map_err(Error::from)
    }

    pub fn clear(&mut self) -> Result<(), ActuatorError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), ActuatorError> {
        let offset = ROW_OFFSETS[usize::from(row.min(1))];
        self.command(CMD_SET_DDRAM | (col + offset))
    }

    /// Write ASCII text at the cursor.  Anything past the line width is
    /// dropped.
    pub fn print(&mut self, text: &str) -> Result<(), ActuatorError> {
        for byte in text.bytes().take(LCD_COLS) {
            self.send(byte, RS)?;
        }
        Ok(())
    }

    pub fn backlight_on(&self) -> bool {
        self.backlight
    }

    // ── Internal ──────────────────────────────────────────────────

    fn command(&mut self, value: u8) -> Result<(), ActuatorError> {
        self.send(value, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), ActuatorError> {
        self.write_nibble(value & 0xF0, mode)?;
        self.write_nibble((value << 4) & 0xF0, mode)
    }

    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), ActuatorError> {
        let data = nibble | mode;
        self.expander_write(data | EN)?;
        self.delay.delay_us(1);
        self.expander_write(data & !EN)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, data: u8) -> Result<(), ActuatorError> {
        let bl = if self.backlight { BACKLIGHT } else { 0 };
        self.i2c
            .write(self.address, &[data | bl])
            .map_err(|_| ActuatorError::BusWriteFailed)
    }
}

impl<I, D> TextDisplay for CharacterLcd<I, D>
where
    I: I2c,
    D: DelayNs,
{
    fn show(&mut self, page: &DisplayPage) -> Result<(), ActuatorError> {
        self.backlight = true;
        self.clear()?;
        self.print(page.line1())?;
        self.set_cursor(0, 1)?;
        self.print(page.line2())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.backlight = on;
        self.expander_write(0)
    }
}
