//! Sharp LS029B3SX02 panel driver
//!
//! 2.9" 1440x1440 LCD behind a 4-lane MIPI-DSI video mode link. The panel
//! needs no register programming beyond the standard DCS sleep and display
//! commands; everything else is GPIO sequencing.
//!
//! # Device tree
//!
//! ```text
//! panel@0 {
//!     compatible = "sharp,ls029b3sx02";
//!     reg = <0>;
//!     bl-en-gpios = <&gpio 12 GPIO_ACTIVE_HIGH>;
//!     reset-gpios = <&gpio 13 GPIO_ACTIVE_HIGH>;
//! };
//! ```
//!
//! # Power sequence
//!
//! ```text
//! prepare:   bl-en ↑, reset ↓ ↑ ↓ (10 ms each), exit_sleep_mode, 120 ms,
//!            set_display_on, 50 ms
//! unprepare: bl-en ↓, set_display_off, enter_sleep_mode, 100 ms, reset ↑
//! ```

use dsipanel_core::config::{GpioRequest, PowerTimings, SleepRange};
use dsipanel_core::mode::clock_khz;
use dsipanel_core::panel::PanelEvent;
use dsipanel_core::{
    Connector, ConnectorType, DeviceNode, DisplayMode, DsiDriver, DsiHost, DsiModeFlags, Error,
    MipiDsiDevice, ModeType, OfDeviceId, Panel, PanelId, PanelInfo, PanelRegistry, PanelState,
    PixelFormat, SyncTiming,
};
use dsipanel_hal::{DelayNs, GpioProvider, Level, OutputPin};

/// Device-tree compatible string
pub const COMPATIBLE: &str = "sharp,ls029b3sx02";

/// Backlight enable line, off until prepare
pub const BL_EN_GPIO: GpioRequest = GpioRequest::new("bl-en", Level::Low);

/// Reset line, held high while the panel is idle
pub const RESET_GPIO: GpioRequest = GpioRequest::new("reset", Level::High);

/// Data lanes used by the panel
pub const LANES: u8 = 4;

/// Video mode link flags
pub const MODE_FLAGS: DsiModeFlags = DsiModeFlags::VIDEO
    .union(DsiModeFlags::VIDEO_BURST)
    .union(DsiModeFlags::VIDEO_SYNC_PULSE);

pub const TIMINGS: PowerTimings = PowerTimings {
    reset_step: SleepRange::new(10_000, 11_000),
    exit_sleep_ms: 120,
    display_on_ms: 50,
    power_off_ms: 100,
};

const H: SyncTiming = SyncTiming::new(1440, 38, 2, 22);
const V: SyncTiming = SyncTiming::new(1440, 8, 2, 6);

/// The panel's only mode, 1440x1440 at 60 Hz
pub const DEFAULT_MODE: DisplayMode =
    DisplayMode::from_timings(clock_khz(&H, &V, 60), H, V).with_size_mm(51, 51);

/// A bound LS029B3SX02
///
/// Created by [`probe`](Self::probe) and torn down by
/// [`remove`](Self::remove). Both GPIO lines come from the same provider and
/// so share one line type `P`.
pub struct Ls029b3sx02<H, P, D> {
    dsi: MipiDsiDevice<H>,
    bl_en: P,
    reset: P,
    delay: D,
    id: PanelId,
    state: PanelState,
}

impl<H, P, D> DsiDriver for Ls029b3sx02<H, P, D> {
    const NAME: &'static str = "panel-sharp-ls029b3sx02";
    const OF_MATCH_TABLE: &'static [OfDeviceId] = &[OfDeviceId::new(COMPATIBLE)];
}

impl<H, P, D> Ls029b3sx02<H, P, D>
where
    H: DsiHost,
    P: OutputPin,
    D: DelayNs,
{
    /// Bind the panel on `node`
    ///
    /// Acquires both GPIO lines, configures the link, registers the panel
    /// and attaches to the DSI host. Nothing stays registered on failure.
    pub fn probe<G, R>(
        node: &DeviceNode,
        mut dsi: MipiDsiDevice<H>,
        gpios: &mut G,
        registry: &mut R,
        delay: D,
    ) -> Result<Self, Error>
    where
        G: GpioProvider<Line = P>,
        R: PanelRegistry,
    {
        let bl_en = gpios
            .request_output(BL_EN_GPIO.con_id, BL_EN_GPIO.initial)
            .map_err(|e| {
                error!("cannot get bl-en gpio: {}", e);
                e
            })?;

        let reset = gpios
            .request_output(RESET_GPIO.con_id, RESET_GPIO.initial)
            .map_err(|e| {
                error!("cannot get reset gpio: {}", e);
                e
            })?;

        let link = dsi.link_mut();
        link.lanes = LANES;
        link.format = PixelFormat::Rgb888;
        link.mode_flags = MODE_FLAGS;

        let info = PanelInfo::new(node.name(), ConnectorType::Dsi)?.with_prepare_prev_first();
        let id = registry.add(info)?;

        if let Err(e) = dsi.attach() {
            error!("failed to attach to DSI host: {}", e);
            registry.remove(id);
            return Err(e);
        }

        Ok(Self {
            dsi,
            bl_en,
            reset,
            delay,
            id,
            state: PanelState::Unprepared,
        })
    }

    /// Probe only if `node` is compatible with this driver
    pub fn bind<G, R>(
        node: &DeviceNode,
        dsi: MipiDsiDevice<H>,
        gpios: &mut G,
        registry: &mut R,
        delay: D,
    ) -> Result<Self, Error>
    where
        G: GpioProvider<Line = P>,
        R: PanelRegistry,
    {
        if Self::of_match(node).is_none() {
            return Err(Error::NoDevice);
        }
        Self::probe(node, dsi, gpios, registry, delay)
    }

    /// Unbind the panel and hand the DSI device back
    pub fn remove<R: PanelRegistry>(self, registry: &mut R) -> MipiDsiDevice<H> {
        let mut dsi = self.dsi;

        if let Err(e) = dsi.detach() {
            error!("failed to detach from DSI host: {}", e);
        }
        registry.remove(self.id);

        dsi
    }

    /// Registry handle of this panel
    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    fn sleep(&mut self, range: SleepRange) {
        self.delay.delay_us(range.min_us);
    }

    fn reset_pulse(&mut self) {
        self.reset.set_low();
        self.sleep(TIMINGS.reset_step);
        self.reset.set_high();
        self.sleep(TIMINGS.reset_step);
        self.reset.set_low();
        self.sleep(TIMINGS.reset_step);
    }

    fn power_on(&mut self) -> Result<(), Error> {
        self.dsi.link_mut().mode_flags.insert(DsiModeFlags::LPM);

        self.dsi.dcs_exit_sleep_mode().map_err(|e| {
            error!("failed to exit sleep mode: {}", e);
            e
        })?;
        self.delay.delay_ms(TIMINGS.exit_sleep_ms);

        self.dsi.dcs_set_display_on().map_err(|e| {
            error!("failed to set display on: {}", e);
            e
        })?;
        self.delay.delay_ms(TIMINGS.display_on_ms);

        Ok(())
    }

    fn power_off(&mut self) {
        self.dsi.link_mut().mode_flags.remove(DsiModeFlags::LPM);

        self.bl_en.set_low();

        if let Err(e) = self.dsi.dcs_set_display_off() {
            error!("failed to set display off: {}", e);
        }
        if let Err(e) = self.dsi.dcs_enter_sleep_mode() {
            error!("failed to enter sleep mode: {}", e);
        }

        self.delay.delay_ms(TIMINGS.power_off_ms);
    }
}

impl<H, P, D> Panel for Ls029b3sx02<H, P, D>
where
    H: DsiHost,
    P: OutputPin,
    D: DelayNs,
{
    fn prepare(&mut self) -> Result<(), Error> {
        if self.state.is_prepared() {
            return Ok(());
        }

        self.bl_en.set_high();
        self.reset_pulse();

        if let Err(e) = self.power_on() {
            error!("failed to set panel on: {}", e);
            self.reset.set_high();
            self.state = self.state.transition(PanelEvent::PowerOnFailed);
            return Err(e);
        }

        self.state = self.state.transition(PanelEvent::PoweredOn);
        Ok(())
    }

    fn unprepare(&mut self) -> Result<(), Error> {
        if !self.state.is_prepared() {
            return Ok(());
        }

        self.power_off();
        self.reset.set_high();
        self.state = self.state.transition(PanelEvent::PoweredOff);

        Ok(())
    }

    fn get_modes(&self, connector: &mut Connector) -> Result<usize, Error> {
        let mut mode = DEFAULT_MODE;
        mode.set_name();
        mode.mode_type = ModeType::DRIVER | ModeType::PREFERRED;

        let (width_mm, height_mm) = (mode.width_mm, mode.height_mm);

        if let Err(e) = connector.add_probed_mode(mode) {
            error!(
                "failed to add mode {}x{}@{}",
                DEFAULT_MODE.hdisplay,
                DEFAULT_MODE.vdisplay,
                DEFAULT_MODE.vrefresh()
            );
            return Err(e);
        }

        connector.display_info.width_mm = u32::from(width_mm);
        connector.display_info.height_mm = u32::from(height_mm);

        Ok(1)
    }
}
