//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions, the I²C bus for the LCD backpack, and the
//! GPIO ISR service using raw ESP-IDF sys calls.  Called once from `main()`
//! before the control loop starts.  Every helper has a host-side stub so the
//! rest of the crate compiles and tests off-target.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    I2cInitFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::I2cInitFailed(rc) => write!(f, "I2C init failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_i2c()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const BUTTON_GPIOS: [i32; 6] = [
    pins::BTN_LOWTEMP_UP_GPIO,
    pins::BTN_LOWTEMP_DOWN_GPIO,
    pins::BTN_HIGHTEMP_UP_GPIO,
    pins::BTN_HIGHTEMP_DOWN_GPIO,
    pins::BTN_MANUAL_RETRACT_GPIO,
    pins::BTN_MANUAL_EXTEND_GPIO,
];

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    let mut input_pins = BUTTON_GPIOS.to_vec();
    input_pins.push(pins::MODE_SWITCH_GPIO);

    for &pin in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    // DHT22 data line: starts as an input; the climate driver flips the
    // direction around each read.
    let dht_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::DHT_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&dht_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::MOTOR_ENABLE_GPIO,
        pins::MOTOR_EXTEND_GPIO,
        pins::MOTOR_RETRACT_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (motor bridge disabled)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Microsecond helpers (DHT22 bit-banging) ──────────────────

#[cfg(target_os = "espidf")]
pub fn now_us() -> u64 {
    // SAFETY: esp_timer_get_time is a monotonic counter read.
    (unsafe { esp_timer_get_time() }) as u64
}

#[cfg(not(target_os = "espidf"))]
pub fn now_us() -> u64 {
    0
}

#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    // SAFETY: busy-wait delay from ROM; no side effects.
    unsafe { esp_rom_delay_us(us) };
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_us(_us: u32) {}

// ── I²C master (LCD backpack) ─────────────────────────────────

#[cfg(target_os = "espidf")]
const I2C_PORT: i32 = 0;

#[cfg(target_os = "espidf")]
unsafe fn init_i2c() -> Result<(), HwInitError> {
    let mut cfg = i2c_config_t {
        mode: i2c_mode_t_I2C_MODE_MASTER,
        sda_io_num: pins::I2C_SDA_GPIO,
        scl_io_num: pins::I2C_SCL_GPIO,
        sda_pullup_en: true,
        scl_pullup_en: true,
        ..Default::default()
    };
    cfg.__bindgen_anon_1.master.clk_speed = pins::I2C_FREQ_HZ;

    let ret = unsafe { i2c_param_config(I2C_PORT, &cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cInitFailed(ret));
    }
    let ret = unsafe { i2c_driver_install(I2C_PORT, i2c_mode_t_I2C_MODE_MASTER, 0, 0, 0) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cInitFailed(ret));
    }

    info!("hw_init: I2C master configured (LCD backpack)");
    Ok(())
}

/// Write raw bytes to an I²C device.  Returns false on bus error.
#[cfg(target_os = "espidf")]
pub fn i2c_write(addr: u8, data: &[u8]) -> bool {
    // SAFETY: the I2C driver was installed in init_i2c(); main-loop only.
    let ret = unsafe {
        i2c_master_write_to_device(
            I2C_PORT,
            addr,
            data.as_ptr(),
            data.len(),
            100, // ticks
        )
    };
    ret == ESP_OK as i32
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_write(_addr: u8, _data: &[u8]) -> bool {
    true
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::drivers::buttons::{button_isr_handler, ButtonId};

#[cfg(target_os = "espidf")]
fn isr_now_ms() -> u32 {
    // SAFETY: esp_timer_get_time is an RTC counter read; safe in ISR context.
    ((unsafe { esp_timer_get_time() }) / 1_000) as u32
}

#[cfg(target_os = "espidf")]
macro_rules! button_isr {
    ($fn_name:ident, $id:expr) => {
        unsafe extern "C" fn $fn_name(_arg: *mut core::ffi::c_void) {
            button_isr_handler($id, isr_now_ms());
        }
    };
}

#[cfg(target_os = "espidf")]
button_isr!(lowtemp_up_isr, ButtonId::LowTempUp);
#[cfg(target_os = "espidf")]
button_isr!(lowtemp_down_isr, ButtonId::LowTempDown);
#[cfg(target_os = "espidf")]
button_isr!(hightemp_up_isr, ButtonId::HighTempUp);
#[cfg(target_os = "espidf")]
button_isr!(hightemp_down_isr, ButtonId::HighTempDown);
#[cfg(target_os = "espidf")]
button_isr!(manual_retract_isr, ButtonId::ManualRetract);
#[cfg(target_os = "espidf")]
button_isr!(manual_extend_isr, ButtonId::ManualExtend);

/// Install the per-pin GPIO ISR service and register the six button
/// interrupts.  Call after init_peripherals() and before the control loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    type IsrFn = unsafe extern "C" fn(*mut core::ffi::c_void);
    const HANDLERS: [IsrFn; 6] = [
        lowtemp_up_isr,
        lowtemp_down_isr,
        hightemp_up_isr,
        hightemp_down_isr,
        manual_retract_isr,
        manual_extend_isr,
    ];

    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handlers registered
    // below only store into the lock-free edge latch.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        for (pin, handler) in BUTTON_GPIOS.iter().zip(HANDLERS) {
            gpio_set_intr_type(*pin, gpio_int_type_t_GPIO_INTR_POSEDGE);
            gpio_isr_handler_add(*pin, Some(handler), core::ptr::null_mut());
            gpio_intr_enable(*pin);
        }

        info!("hw_init: ISR service installed (6 buttons, rising edge)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
