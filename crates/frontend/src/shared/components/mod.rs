pub mod kpi_card;
