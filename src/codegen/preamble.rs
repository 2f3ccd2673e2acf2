//! Fixed GLSL helper library prepended to every generated shader
//!
//! The function names here are part of the generated-code contract.

/// Field functions, boolean combinators and domain warps
pub const PREAMBLE: &str = r#"
precision highp float;

float sdCircle( vec2 p, float r ) {
    return length(p) - r;
}

float sdBox( in vec2 p, in vec2 b ) {
    vec2 d = abs(p)-b;
    return length(max(d,0.0)) + min(max(d.x,d.y),0.0);
}

float sdCapsule( vec2 p, float h, float r ) {
    p.y -= clamp( p.y, -h*0.5, h*0.5 );
    return length( p ) - r;
}

float opSmoothUnion( float d1, float d2, float k ) {
    float h = clamp( 0.5 + 0.5*(d2-d1)/max(k,0.0001), 0.0, 1.0 );
    return mix( d2, d1, h ) - k*h*(1.0-h);
}

float opSmoothSubtraction( float d1, float d2, float k ) {
    float h = clamp( 0.5 - 0.5*(d2+d1)/max(k,0.0001), 0.0, 1.0 );
    return mix( d2, -d1, h ) + k*h*(1.0-h);
}

float opSmoothIntersection( float d1, float d2, float k ) {
    float h = clamp( 0.5 - 0.5*(d2-d1)/max(k,0.0001), 0.0, 1.0 );
    return mix( d2, d1, h ) + k*h*(1.0-h);
}

float opXor(float d1, float d2) {
    return max(min(d1, d2), -max(d1, d2));
}

vec2 rotate(vec2 p, float a) {
    float s = sin(a);
    float c = cos(a);
    return mat2(c, -s, s, c) * p;
}

vec2 opRepeat(vec2 p, vec2 period) {
    return mod(p + 0.5*period, period) - 0.5*period;
}

vec2 opMirror(vec2 p, float offset, bool isX) {
    if(isX) p.x = abs(p.x - offset);
    else p.y = abs(p.y - offset);
    return p;
}

vec2 opBend(vec2 p, float k, bool isX) {
    float c = cos(k*(isX ? p.x : p.y));
    float s = sin(k*(isX ? p.x : p.y));
    mat2 m = mat2(c,-s,s,c);
    return m*p;
}

vec2 opTwist(vec2 p, float k) {
    float a = k*length(p);
    float s = sin(a);
    float c = cos(a);
    return mat2(c,-s,s,c)*p;
}
"#;

/// Names of every helper the preamble defines
pub const HELPER_NAMES: [&str; 12] = [
    "sdCircle",
    "sdBox",
    "sdCapsule",
    "opSmoothUnion",
    "opSmoothSubtraction",
    "opSmoothIntersection",
    "opXor",
    "rotate",
    "opRepeat",
    "opMirror",
    "opBend",
    "opTwist",
];
