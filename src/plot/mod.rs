use serde::{Serialize, Deserialize};
use std::io::Write;
use crate::error::JobError;

/// Display hints for a curve, in the format-string convention of common plotting
/// libraries: line is a color/style code such as "b-" (solid blue) or "g--"
/// (dashed green); width is the line width and alpha its opacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub line : String,
    pub width : f64,
    pub alpha : f64
}

impl LineStyle {

    pub fn new(line : &str) -> Self {
        Self { line : line.to_string(), ..Default::default() }
    }

    pub fn with_width(mut self, width : f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_alpha(mut self, alpha : f64) -> Self {
        self.alpha = alpha;
        self
    }

}

impl Default for LineStyle {

    fn default() -> Self {
        Self { line : String::from("b-"), width : 3.0, alpha : 1.0 }
    }

}

/// A (x, y) sequence to be rendered as a line by the plotting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub label : Option<String>,
    pub x : Vec<f64>,
    pub y : Vec<f64>,
    pub style : LineStyle
}

impl Curve {

    pub fn new(x : Vec<f64>, y : Vec<f64>, style : LineStyle) -> Self {
        assert!(x.len() == y.len(), "Curve abscissa and ordinate should have the same length");
        Self { label : None, x, y, style }
    }

    pub fn with_label(mut self, label : &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

}

/// Margins of the subplot area, as fractions of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub bottom : f64,
    pub top : f64,
    pub right : f64
}

/// Rendering settings for the plotting collaborator. This is a plain value carried
/// along with the figures it applies to, so different outputs can use different
/// settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub font_size : f64,
    pub font_family : String,
    pub serif : Vec<String>,
    pub axes_label_size : f64,
    pub tick_label_size : f64,
    pub tick_pad : f64,
    pub dpi : u32,
    pub usetex : bool,
    pub subplot : Margins,

    // Exponent range outside of which tick labels switch to scientific notation.
    pub formatter_limits : (i32, i32)
}

impl PlotConfig {

    /// Turns TeX processing of labels on, with a matching serif font.
    pub fn tex_on(mut self) -> Self {
        self.usetex = true;
        self.serif = vec![String::from("Computer Modern Roman")];
        self
    }

    pub fn tex_off(mut self) -> Self {
        self.usetex = false;
        self.serif = vec![String::from("Times")];
        self
    }

}

impl Default for PlotConfig {

    fn default() -> Self {
        Self {
            font_size : 14.,
            font_family : String::from("serif"),
            serif : vec![String::from("Times")],
            axes_label_size : 18.,
            tick_label_size : 14.,
            tick_pad : 8.,
            dpi : 150,
            usetex : false,
            subplot : Margins { bottom : 0.125, top : 0.95, right : 0.95 },
            formatter_limits : (-4, 4)
        }
    }

}

/// A set of curves sharing the same axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Figure {
    pub xlabel : Option<String>,
    pub ylabel : Option<String>,
    pub curves : Vec<Curve>
}

impl Figure {

    pub fn new(xlabel : Option<String>, ylabel : Option<String>) -> Self {
        Self { xlabel, ylabel, curves : Vec::new() }
    }

    pub fn push(&mut self, curve : Curve) {
        self.curves.push(curve);
    }

}

/// Everything the plotting collaborator needs to render a set of figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Report {
    #[serde(default)]
    pub config : PlotConfig,
    pub figures : Vec<Figure>
}

// One line of the long-format CSV output.
#[derive(Serialize)]
struct CurvePoint<'a> {
    figure : usize,
    curve : &'a str,
    x : f64,
    y : f64
}

impl Report {

    pub fn new(config : PlotConfig, figures : Vec<Figure>) -> Self {
        Self { config, figures }
    }

    pub fn save_json<W>(&self, mut writer : W) -> Result<(), JobError>
    where
        W : Write
    {
        let content = serde_json::to_string_pretty(&self)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Writes all curves in long format, with columns figure, curve, x, y. Unlabeled
    /// curves are named by their position within the figure.
    pub fn save_csv<W>(&self, writer : W) -> Result<(), JobError>
    where
        W : Write
    {
        let mut wtr = csv::Writer::from_writer(writer);
        for (fig_ix, fig) in self.figures.iter().enumerate() {
            for (curve_ix, curve) in fig.curves.iter().enumerate() {
                let name = curve.label.clone().unwrap_or_else(|| format!("curve{}", curve_ix) );
                for (x, y) in curve.x.iter().zip(curve.y.iter()) {
                    wtr.serialize(CurvePoint { figure : fig_ix, curve : &name, x : *x, y : *y })?;
                }
            }
        }
        wtr.flush()?;
        Ok(())
    }

}
