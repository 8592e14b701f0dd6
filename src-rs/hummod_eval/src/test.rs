//! Module sources shared by the evaluation tests.

use crate::{client::Client, loader::SourceMap};

pub const HEART: &str = "<structure><name>Heart</name>
  <variables>
    <parm><name>Rate</name><val>72</val></parm>
    <var><name>Label</name><val>left ventricle</val></var>
  </variables>
  <definitions>
    <def><name>Pump</name><val>Rate</val></def>
  </definitions>
</structure>";

pub const LUNGS: &str = "<structure><name>Lungs</name>
  <variables>
    <parm><name>Tidal</name><val>0.5</val></parm>
  </variables>
  <definitions>
    <block><name>Ventilate</name>
      <call>Lungs.Inhale</call>
      <def><name>Volume</name><val>Tidal</val></def>
    </block>
    <def><name>Inhale</name><val>Tidal</val></def>
  </definitions>
</structure>";

pub const VALVE: &str = "<structure><name>Valve</name>
  <variables>
    <var><name>Area</name></var>
    <var><name>Effect</name></var>
    <parm><name>Conductance</name><val>0.5</val></parm>
    <var><name>Leak</name></var>
  </variables>
  <functions>
    <curve><name>Effect</name>
      <point><x>0.0</x><y>1.0</y><slope>0.0</slope></point>
      <point><x>3.3</x><y>0.0</y><slope>0.0</slope></point>
    </curve>
    <curve><name>Spare</name>
      <point><x>0</x><y>0</y><slope>1</slope></point>
      <point><x>1</x><y>1</y><slope>1</slope></point>
    </curve>
    <dfq><name>Leak</name><expr>Conductance * 0.1</expr></dfq>
  </functions>
  <definitions>
    <def><name>Flow</name><val>Conductance</val></def>
    <block><name>Parms</name>
      <def><name>Effect</name><val>Effect [ Area ]</val></def>
    </block>
    <def><name>Opening</name><val>Effect [ Area ]</val></def>
    <def><name>LeakRate</name><val>Leak [ Area ]</val></def>
  </definitions>
</structure>";

pub const CIRCULATION: &str = "<structure><name>Circulation</name>
  <variables>
    <parm><name>Base</name><val>2</val></parm>
    <var><name>Resistance</name></var>
  </variables>
  <functions>
    <curve><name>Resistance</name>
      <point><x>0</x><y>2</y><slope>0</slope></point>
      <point><x>100</x><y>1</y><slope>0</slope></point>
    </curve>
  </functions>
  <definitions>
    <block><name>Beat</name>
      <call>Heart.Pump</call>
      <call>Lungs.Ventilate</call>
    </block>
    <block><name>Tone</name>
      <call>Heart.Pump</call>
      <def><name>Resistance</name><val>Resistance [ Heart.Rate ]</val></def>
      <def><name>Note</name><val>vascular tone</val></def>
    </block>
    <def><name>Pressure</name><val>Heart.Rate</val></def>
    <block><name>Broken</name>
      <call>Heart</call>
    </block>
  </definitions>
</structure>";

pub const PING: &str = "<structure><name>Ping</name>
  <variables>
    <var><name>Echo</name></var>
    <parm><name>Gain</name><val>1</val></parm>
  </variables>
  <functions>
    <curve><name>Echo</name>
      <point><x>0</x><y>1</y><slope>0</slope></point>
      <point><x>1</x><y>0</y><slope>0</slope></point>
    </curve>
  </functions>
  <definitions>
    <def><name>Listen</name><val>Echo [ Pong.Echo ]</val></def>
  </definitions>
</structure>";

pub const PONG: &str = "<structure><name>Pong</name>
  <variables>
    <var><name>Echo</name></var>
  </variables>
  <functions>
    <curve><name>Echo</name>
      <point><x>0</x><y>1</y><slope>0</slope></point>
      <point><x>1</x><y>0</y><slope>0</slope></point>
    </curve>
  </functions>
  <definitions>
    <def><name>Listen</name><val>Echo [ Ping.Echo ]</val></def>
  </definitions>
</structure>";

/// A client over the Heart, Lungs, Valve, and Circulation modules.
pub fn client() -> Client<SourceMap> {
    Client::new(
        SourceMap::new()
            .with_source("Heart", HEART)
            .with_source("Lungs", LUNGS)
            .with_source("Valve", VALVE)
            .with_source("Circulation", CIRCULATION),
    )
}
