//! Serial port configuration and connection management
//!
//! Handles serial port discovery and the connection the sensor streams over.

use crate::error::{ConnectionError, PlotError};
use colored::Colorize;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{self, Read};
use std::time::Duration;

/// Default baud rate of the sensor firmware console
pub const DEFAULT_BAUD: u32 = 115200;

/// How long a single line read may block before returning what it has
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for serial port connection
#[derive(Debug, Clone)]
pub struct PortConfig {
    /// Serial port path (e.g., /dev/ttyUSB0, /dev/ttyACM0, COM3)
    pub port_path: String,
    /// Baud rate (default: 115200)
    pub baud_rate: u32,
    /// Data bits (default: 8)
    pub data_bits: DataBits,
    /// Parity (default: none)
    pub parity: Parity,
    /// Stop bits (default: 1)
    pub stop_bits: StopBits,
    /// Flow control (default: none)
    pub flow_control: FlowControl,
    /// Read timeout (default: 5 s)
    pub timeout: Duration,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            port_path: String::from("/dev/ttyUSB0"),
            baud_rate: DEFAULT_BAUD,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            timeout: READ_TIMEOUT,
        }
    }
}

impl PortConfig {
    /// Create a new 8N1 configuration for the given port
    pub fn new(port_path: &str) -> Self {
        Self {
            port_path: port_path.to_string(),
            ..Default::default()
        }
    }

    /// Set the baud rate
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the read timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// An open serial port, closed when dropped
pub struct SerialConnection {
    port: Box<dyn SerialPort>,
    config: PortConfig,
}

impl SerialConnection {
    /// Open a serial connection with the given configuration
    pub fn open(config: PortConfig) -> Result<Self, ConnectionError> {
        let port = serialport::new(&config.port_path, config.baud_rate)
            .data_bits(config.data_bits)
            .parity(config.parity)
            .stop_bits(config.stop_bits)
            .flow_control(config.flow_control)
            .timeout(config.timeout)
            .open()
            .map_err(|source| ConnectionError::Open {
                path: config.port_path.clone(),
                source,
            })?;

        log::info!(
            "Connected to {} at {} baud",
            config.port_path,
            config.baud_rate
        );

        Ok(Self { port, config })
    }

    /// Get the port configuration
    pub fn config(&self) -> &PortConfig {
        &self.config
    }
}

impl Read for SerialConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf)
    }
}

impl Drop for SerialConnection {
    fn drop(&mut self) {
        log::debug!("Closing serial port {}", self.config.port_path);
    }
}

/// Information about a detected serial port
#[derive(Debug, Clone)]
pub struct PortInfo {
    pub path: String,
    pub port_type: PortType,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub serial_number: Option<String>,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
}

impl PortInfo {
    fn from_path(path: &str, port_type: PortType) -> Self {
        Self {
            path: path.to_string(),
            port_type,
            manufacturer: None,
            product: None,
            serial_number: None,
            vid: None,
            pid: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PortType {
    UsbSerial,
    PciSerial,
    Bluetooth,
    Unknown,
}

impl std::fmt::Display for PortType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortType::UsbSerial => write!(f, "USB Serial"),
            PortType::PciSerial => write!(f, "PCI Serial"),
            PortType::Bluetooth => write!(f, "Bluetooth"),
            PortType::Unknown => write!(f, "Unknown"),
        }
    }
}

impl From<serialport::SerialPortInfo> for PortInfo {
    fn from(p: serialport::SerialPortInfo) -> Self {
        match p.port_type {
            serialport::SerialPortType::UsbPort(info) => PortInfo {
                path: p.port_name,
                port_type: PortType::UsbSerial,
                manufacturer: info.manufacturer,
                product: info.product,
                serial_number: info.serial_number,
                vid: Some(info.vid),
                pid: Some(info.pid),
            },
            serialport::SerialPortType::PciPort => {
                PortInfo::from_path(&p.port_name, PortType::PciSerial)
            }
            serialport::SerialPortType::BluetoothPort => {
                PortInfo::from_path(&p.port_name, PortType::Bluetooth)
            }
            serialport::SerialPortType::Unknown => {
                PortInfo::from_path(&p.port_name, PortType::Unknown)
            }
        }
    }
}

/// List all available serial ports, in the order the OS reports them
pub fn list_ports() -> Result<Vec<PortInfo>, ConnectionError> {
    let ports = serialport::available_ports().map_err(ConnectionError::Enumerate)?;
    Ok(ports.into_iter().map(PortInfo::from).collect())
}

/// Resolve the port to open: the explicit path if given, otherwise the
/// first enumerated port
pub fn select_port(explicit: Option<String>) -> Result<String, PlotError> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let ports = list_ports()?;
    let path = first_port(&ports)?;
    log::info!("Auto-selected serial port {}", path);
    Ok(path)
}

/// First entry of an enumeration. No ranking beyond enumeration order.
fn first_port(ports: &[PortInfo]) -> Result<String, PlotError> {
    ports
        .first()
        .map(|p| p.path.clone())
        .ok_or(PlotError::NoDeviceFound)
}

/// Print formatted list of available serial ports
pub fn print_ports() -> Result<(), ConnectionError> {
    let ports = list_ports()?;

    if ports.is_empty() {
        println!("{}", "No serial ports found".yellow());
        println!("\n{}", "Troubleshooting tips:".cyan().bold());
        println!("  1. Connect the sensor board over USB");
        println!("  2. Check if the device is recognized: ls -la /dev/ttyUSB* /dev/ttyACM*");
        println!("  3. Add your user to the 'dialout' group: sudo usermod -aG dialout $USER");
        return Ok(());
    }

    println!("{}", "Available Serial Ports:".green().bold());
    println!("{}", "=".repeat(60));

    for (i, port) in ports.iter().enumerate() {
        let marker = if i == 0 { " (default)".dimmed().to_string() } else { String::new() };
        println!("\n{}: {}{}", "Port".cyan(), port.path.white().bold(), marker);
        println!("  Type: {}", port.port_type);

        if let Some(ref mfg) = port.manufacturer {
            println!("  Manufacturer: {}", mfg);
        }
        if let Some(ref prod) = port.product {
            println!("  Product: {}", prod);
        }
        if let Some(ref sn) = port.serial_number {
            println!("  Serial: {}", sn);
        }
        if let (Some(vid), Some(pid)) = (port.vid, port.pid) {
            println!("  VID:PID: {:04x}:{:04x}", vid, pid);
        }
    }

    println!("\n{}", "=".repeat(60));
    println!(
        "{}",
        "Use: sensor-plot -p <PORT> to plot from a specific port".yellow()
    );

    Ok(())
}
