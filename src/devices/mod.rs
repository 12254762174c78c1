pub mod sensor_mcu;
